use crate::cli::parser::{Commands, TermAction};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::edit::{EditLogic, TermEdit};
use crate::db::pool::DbPool;
use crate::db::queries::load_gradebook;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Term { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            TermAction::Add { name, start, end } => {
                AddLogic::term(&mut pool, name, start.as_deref(), end.as_deref())?;
            }
            TermAction::Edit {
                id,
                name,
                start,
                end,
            } => {
                let edit = TermEdit {
                    name: name.clone(),
                    start: start.clone(),
                    end: end.clone(),
                };
                EditLogic::term(&mut pool, *id, &edit)?;
            }
            TermAction::List => {
                let book = load_gradebook(&pool.conn)?;
                if book.terms.is_empty() {
                    info("No terms yet. Add one with `term add <name>`.");
                    return Ok(());
                }

                header("Terms");
                let mut table = Table::new(vec![
                    Column::new("ID", 3),
                    Column::new("Name", 12),
                    Column::new("Start", 10),
                    Column::new("End", 10),
                    Column::new("Courses", 7),
                ]);
                for t in &book.terms {
                    table.add_row(vec![
                        t.id.to_string(),
                        t.name.clone(),
                        t.start_date.clone(),
                        t.end_date.clone(),
                        book.courses_in_term(t.id).count().to_string(),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
