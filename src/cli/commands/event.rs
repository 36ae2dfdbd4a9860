use crate::cli::parser::{Commands, EventAction};
use crate::config::Config;
use crate::core::add::{AddLogic, NewEvent};
use crate::core::edit::{EditLogic, EventEdit};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Event { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            EventAction::Add {
                name,
                date,
                start,
                end,
                all_day,
                category,
                location,
                description,
            } => {
                let input = NewEvent {
                    name: name.clone(),
                    date: date.clone(),
                    start: start.clone(),
                    end: end.clone(),
                    all_day: *all_day,
                    category_id: *category,
                    location: location.clone(),
                    description: description.clone(),
                };
                AddLogic::event(&mut pool, &input)?;
            }
            EventAction::Edit {
                id,
                name,
                date,
                start,
                end,
                category,
                location,
                description,
            } => {
                let edit = EventEdit {
                    name: name.clone(),
                    date: date.clone(),
                    start: start.clone(),
                    end: end.clone(),
                    category_id: *category,
                    location: location.clone(),
                    description: description.clone(),
                };
                EditLogic::event(&mut pool, *id, &edit)?;
            }
        }
    }

    Ok(())
}
