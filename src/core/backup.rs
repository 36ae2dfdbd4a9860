use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::path::resolve_destination;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database to `dest_file`, optionally compressed.
    /// Returns the path actually written, or `None` if the user declined
    /// to overwrite an existing file.
    pub fn backup(
        pool: &mut DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);
        let dest = resolve_destination(dest_file)?;

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        // 2.5️⃣ If destination file exists → ask confirmation
        if dest.exists() && !confirm_overwrite(&dest)? {
            info("Backup cancelled by user.");
            return Ok(None);
        }

        // 3️⃣ Copy database
        fs::copy(src, &dest)?;
        success(format!("Backup created: {}", dest.display()));

        // 4️⃣ Optional compression
        let final_path = if compress {
            let compressed = compress_backup(&dest)?;
            if compressed != dest {
                match fs::remove_file(&dest) {
                    Ok(()) => info(format!("Removed uncompressed backup: {}", dest.display())),
                    Err(e) => warning(format!("Failed to remove uncompressed backup: {}", e)),
                }
            }
            compressed
        } else {
            dest
        };

        // 5️⃣ Log in DB
        ttlog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        Ok(Some(final_path))
    }
}

const SQLITE_MAGIC: &[u8; 16] = b"SQLite format 3\0";

impl BackupLogic {
    /// Replace the database with the content of a backup (plain copy,
    /// `.tar.gz` or `.zip`). Returns `false` if the user declined.
    ///
    /// The backup is unpacked next to the database and checked before the
    /// swap, so a bad file never replaces a good database. Pending
    /// migrations run on the restored file.
    pub fn restore(cfg: &Config, src_file: &str, force: bool) -> AppResult<bool> {
        let src = resolve_destination(src_file)?;
        let db = PathBuf::from(&cfg.database);

        if !src.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Backup not found: {}", src.display()),
            )
            .into());
        }

        if db.exists() && !force && !confirm_overwrite(&db)? {
            info("Restore cancelled by user.");
            return Ok(false);
        }

        if let Some(parent) = db.parent() {
            fs::create_dir_all(parent)?;
        }
        let staged = PathBuf::from(format!("{}.restore", db.display()));
        if let Err(e) = unpack_backup(&src, &staged).and_then(|()| check_sqlite(&staged, &src)) {
            fs::remove_file(&staged).ok();
            return Err(e);
        }
        fs::rename(&staged, &db)?;
        success(format!("Database restored from {}", src.display()));

        let pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;
        ttlog(
            &pool.conn,
            "restore",
            &src.to_string_lossy(),
            "Database restored from backup",
        )?;
        Ok(true)
    }
}

/// Copy the database file out of `src` into `dest`.
fn unpack_backup(src: &Path, dest: &Path) -> AppResult<()> {
    let name = src.to_string_lossy().to_lowercase();
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        unpack_tar_gz(src, dest)
    } else if name.ends_with(".zip") {
        unpack_zip(src, dest)
    } else {
        fs::copy(src, dest)?;
        Ok(())
    }
}

fn unpack_tar_gz(src: &Path, dest: &Path) -> AppResult<()> {
    use flate2::read::GzDecoder;

    let mut archive = tar::Archive::new(GzDecoder::new(fs::File::open(src)?));
    for entry in archive.entries()? {
        let mut entry = entry?;
        if entry.header().entry_type().is_file() {
            let mut out = fs::File::create(dest)?;
            io::copy(&mut entry, &mut out)?;
            return Ok(());
        }
    }
    Err(AppError::InvalidBackup(format!(
        "no database file inside {}",
        src.display()
    )))
}

fn unpack_zip(src: &Path, dest: &Path) -> AppResult<()> {
    let mut archive = zip::ZipArchive::new(fs::File::open(src)?).map_err(io::Error::other)?;
    if archive.is_empty() {
        return Err(AppError::InvalidBackup(format!(
            "no database file inside {}",
            src.display()
        )));
    }
    let mut entry = archive.by_index(0).map_err(io::Error::other)?;
    let mut out = fs::File::create(dest)?;
    io::copy(&mut entry, &mut out)?;
    Ok(())
}

/// Reject anything that is not an SQLite database.
fn check_sqlite(path: &Path, origin: &Path) -> AppResult<()> {
    let mut header = [0u8; 16];
    let is_sqlite =
        fs::File::open(path)?.read_exact(&mut header).is_ok() && &header == SQLITE_MAGIC;
    if is_sqlite {
        Ok(())
    } else {
        Err(AppError::InvalidBackup(format!(
            "{} is not an SQLite database",
            origin.display()
        )))
    }
}

fn confirm_overwrite(dest: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", dest.display()));
    print!("Overwrite it? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn entry_name(path: &Path) -> AppResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("Invalid backup path: {}", path.display())))
}

/// Compress a backup using .zip
#[cfg(target_os = "windows")]
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name(path)?, options)
        .map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    info(format!("Compressed: {}", zip_path.display()));
    Ok(zip_path)
}

/// Compress a backup using .tar.gz
#[cfg(not(target_os = "windows"))]
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    let gz_path = PathBuf::from(format!("{}.tar.gz", path.display()));
    let file = fs::File::create(&gz_path)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = tar::Builder::new(encoder);

    archive.append_path_with_name(path, entry_name(path)?)?;
    archive.into_inner()?.finish()?;

    info(format!("Compressed: {}", gz_path.display()));
    Ok(gz_path)
}
