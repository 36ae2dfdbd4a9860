use crate::cli::parser::{CourseAction, Commands};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::edit::{CourseEdit, EditLogic};
use crate::db::pool::DbPool;
use crate::db::queries::load_gradebook;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Course { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            CourseAction::Add {
                name,
                term,
                number,
                credits,
            } => {
                AddLogic::course(&mut pool, name, *term, number, *credits)?;
            }
            CourseAction::Edit {
                id,
                name,
                number,
                credits,
            } => {
                let edit = CourseEdit {
                    name: name.clone(),
                    number: number.clone(),
                    credits: *credits,
                };
                EditLogic::course(&mut pool, *id, &edit)?;
            }
            CourseAction::List { term } => {
                let book = load_gradebook(&pool.conn)?;
                let courses: Vec<_> = book
                    .courses
                    .iter()
                    .filter(|c| term.is_none_or(|t| c.term_id == t))
                    .collect();

                if courses.is_empty() {
                    info("No courses found.");
                    return Ok(());
                }

                header("Courses");
                let mut table = Table::new(vec![
                    Column::new("ID", 3),
                    Column::new("Name", 16),
                    Column::new("Number", 6),
                    Column::new("Credits", 7),
                    Column::new("Term", 10),
                ]);
                for c in courses {
                    table.add_row(vec![
                        c.id.to_string(),
                        c.name.clone(),
                        c.number.clone(),
                        c.credits.to_string(),
                        book.term(c.term_id).map(|t| t.name.clone()).unwrap_or_default(),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
