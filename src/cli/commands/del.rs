use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::{DeleteLogic, DeleteTarget};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        term,
        course,
        type_id,
        category,
        assignment,
        event,
    } = cmd
    {
        let target = [
            term.map(DeleteTarget::Term),
            course.map(DeleteTarget::Course),
            type_id.map(DeleteTarget::Type),
            category.map(DeleteTarget::Category),
            assignment.map(DeleteTarget::Assignment),
            event.map(DeleteTarget::Event),
        ]
        .into_iter()
        .flatten()
        .next();
        let Some(target) = target else {
            return Ok(());
        };

        let mut prompt = format!(
            "Delete {} #{}?",
            target.kind().to_lowercase(),
            target.id()
        );
        if let Some(note) = target.cascade_note() {
            prompt.push(' ');
            prompt.push_str(note);
        }
        prompt.push_str(" This action is irreversible.");
        if !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut pool = DbPool::new(&cfg.database)?;
        DeleteLogic::apply(&mut pool, target)?;
        success(format!("{} #{} has been deleted.", target.kind(), target.id()));
    }

    Ok(())
}
