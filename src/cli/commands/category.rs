use crate::cli::parser::{CategoryAction, Commands};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::edit::{CategoryEdit, EditLogic};
use crate::db::pool::DbPool;
use crate::db::queries::load_gradebook;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Category { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            CategoryAction::Add { name, color } => {
                AddLogic::category(&mut pool, name, color.as_deref())?;
            }
            CategoryAction::Edit { id, name, color } => {
                let edit = CategoryEdit {
                    name: name.clone(),
                    color: color.clone(),
                };
                EditLogic::category(&mut pool, *id, &edit)?;
            }
            CategoryAction::List => {
                let book = load_gradebook(&pool.conn)?;
                if book.categories.is_empty() {
                    info("No categories yet.");
                    return Ok(());
                }

                header("Categories");
                let mut table = Table::new(vec![
                    Column::new("ID", 3),
                    Column::new("Name", 12),
                    Column::new("Color", 7),
                ]);
                for c in &book.categories {
                    table.add_row(vec![c.id.to_string(), c.name.clone(), c.color.clone()]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
