use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::diagnostics::DbLog;
use crate::core::orderer::{ListOrderer, SortDirection};
use crate::core::schedule::{ScheduleRow, project};
use crate::db::pool::DbPool;
use crate::db::queries::load_gradebook;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::utils::colors::{GREY, RESET};
use crate::utils::formatting::{done_mark, priority_label};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        sort,
        desc,
        asc,
        select,
    } = cmd
    {
        let key = sort.unwrap_or(cfg.sort_key);
        let ascending = match (*asc, *desc) {
            (_, true) => false,
            (true, _) => true,
            _ => cfg.sort_ascending,
        };

        let pool = DbPool::new(&cfg.database)?;
        let mut book = load_gradebook(&pool.conn)?;

        if book.items.is_empty() {
            info("Nothing scheduled yet. Add an assignment or an event first.");
            return Ok(());
        }

        let log = DbLog::new(&pool.conn);
        let direction = SortDirection::from_ascending(ascending);
        let outcome = ListOrderer::new(key, direction).sort(&mut book, *select, &log);
        let rows = project(&book);

        print!("{}", render(&rows, outcome.selected, cfg.show_ids));
        println!(
            "{}{} item(s), sorted by {} ({}){}",
            GREY,
            rows.len(),
            key.as_str(),
            if ascending { "ascending" } else { "descending" },
            RESET
        );

        if let Some(id) = select
            && outcome.selected.is_none()
        {
            warning(format!("Item #{} is not in the list.", id));
        }
    }
    Ok(())
}

fn render(rows: &[ScheduleRow], selected: Option<usize>, show_ids: bool) -> String {
    let mut columns = vec![Column::new("", 1)];
    if show_ids {
        columns.push(Column::new("ID", 3));
    }
    columns.extend([
        Column::new("✓", 1),
        Column::new("Name", 16),
        Column::new("Type", 10),
        Column::new("Course", 10),
        Column::new("Date", 10),
        Column::new("Time", 8),
        Column::new("Grade", 6),
        Column::new("Priority", 8),
    ]);

    let mut table = Table::new(columns);
    for (i, r) in rows.iter().enumerate() {
        let marker = if Some(i) == selected { "▶" } else { "" };
        let mut cells = vec![marker.to_string()];
        if show_ids {
            cells.push(r.id.to_string());
        }
        cells.extend([
            done_mark(r.done).to_string(),
            r.name.clone(),
            r.type_or_category.clone(),
            r.course.clone(),
            r.date.clone(),
            r.time.clone(),
            r.grade.clone(),
            r.priority.map(priority_label).unwrap_or("").to_string(),
        ]);
        table.add_row(cells);
    }

    table.render()
}
