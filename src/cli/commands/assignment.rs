use crate::cli::parser::{AssignmentAction, Commands};
use crate::config::Config;
use crate::core::add::{AddLogic, NewAssignment};
use crate::core::edit::{AssignmentEdit, EditLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Assignment { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            AssignmentAction::Add {
                name,
                course,
                type_id,
                due,
                time,
                priority,
                comments,
            } => {
                let input = NewAssignment {
                    name: name.clone(),
                    course_id: *course,
                    type_id: *type_id,
                    due: due.clone(),
                    time: time.clone(),
                    priority: *priority,
                    comments: comments.clone(),
                };
                AddLogic::assignment(&mut pool, &input)?;
            }
            AssignmentAction::Grade { id, grade } => {
                EditLogic::grade(&mut pool, *id, grade)?;
            }
            AssignmentAction::Edit {
                id,
                name,
                due,
                time,
                type_id,
                priority,
                comments,
            } => {
                let edit = AssignmentEdit {
                    name: name.clone(),
                    due: due.clone(),
                    time: time.clone(),
                    type_id: *type_id,
                    priority: *priority,
                    comments: comments.clone(),
                };
                EditLogic::assignment(&mut pool, *id, &edit)?;
            }
            AssignmentAction::Done { id, undo } => {
                EditLogic::done(&mut pool, *id, !*undo)?;
            }
        }
    }

    Ok(())
}
