use crate::cli::parser::{Commands, TypeAction};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::edit::EditLogic;
use crate::core::percent::capped_total;
use crate::db::pool::DbPool;
use crate::db::queries::load_gradebook;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, warning};
use crate::utils::grade2readable;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Type { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            TypeAction::Add {
                name,
                course,
                weight,
            } => {
                AddLogic::assignment_type(&mut pool, name, *course, weight.as_deref())?;
            }
            TypeAction::Weight { id, weight } => {
                EditLogic::weight(&mut pool, *id, weight)?;
            }
            TypeAction::Rename { id, name } => {
                EditLogic::rename_type(&mut pool, *id, name)?;
            }
            TypeAction::List { course } => {
                let book = load_gradebook(&pool.conn)?;
                let courses: Vec<_> = book
                    .courses
                    .iter()
                    .filter(|c| course.is_none_or(|id| c.id == id))
                    .collect();

                if courses.is_empty() {
                    info("No courses found.");
                    return Ok(());
                }

                for c in courses {
                    header(format!("{} (#{})", c.name, c.id));

                    let mut table = Table::new(vec![
                        Column::new("ID", 3),
                        Column::new("Type", 12),
                        Column::new("Weight", 6),
                    ]);
                    for t in book.types_of(c.id) {
                        let weight = if t.has_weight() { t.weight.clone() } else { "--".into() };
                        table.add_row(vec![t.id.to_string(), t.name.clone(), weight]);
                    }
                    print!("{}", table.render());

                    match book.total_weight_except(c.id, None) {
                        Ok(total) => println!(
                            "Total weight: {}\n",
                            grade2readable(Some(capped_total(total)))
                        ),
                        Err(e) => warning(e),
                    }
                }
            }
        }
    }

    Ok(())
}
