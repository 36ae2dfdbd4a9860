use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::diagnostics::DbLog;
use crate::core::grades::{CourseReport, GradeAggregator};
use crate::db::pool::DbPool;
use crate::db::queries::load_gradebook;
use crate::errors::{AppError, AppResult};
use crate::models::Gradebook;
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_grade;
use crate::utils::grade2readable;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Grades { term } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let book = load_gradebook(&pool.conn)?;

        if let Some(id) = term
            && book.term(*id).is_none()
        {
            return Err(AppError::NotFound {
                kind: "Term",
                id: *id,
            });
        }

        let terms: Vec<_> = book
            .terms
            .iter()
            .filter(|t| term.is_none_or(|id| t.id == id))
            .collect();

        if terms.is_empty() {
            info("No terms yet. Add one with `term add <name>`.");
            return Ok(());
        }

        let log = DbLog::new(&pool.conn);
        let aggregator = GradeAggregator::new(&book, &log);

        for t in terms {
            header(&t.name);

            let reports: Vec<CourseReport> = book
                .courses_in_term(t.id)
                .map(|c| aggregator.course_report(c.id))
                .collect();

            if reports.is_empty() {
                info("No courses in this term.");
                println!();
                continue;
            }

            print!("{}", render(&book, &reports));

            let term_grade = GradeAggregator::term_grade_from(&reports);
            println!(
                "\nTerm grade: {}\n",
                colorize_grade(term_grade, &grade2readable(term_grade))
            );
        }
    }
    Ok(())
}

/// One row per course; Breakdown lists each weighted type as
/// "name grade (weight)".
fn render(book: &Gradebook, reports: &[CourseReport]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 3),
        Column::new("Course", 16),
        Column::new("Credits", 7),
        Column::new("Graded", 6),
        Column::new("Grade", 6),
        Column::new("Breakdown", 10),
    ]);

    for r in reports {
        let Some(course) = book.course(r.course_id) else {
            continue;
        };
        let breakdown = r
            .tallies
            .iter()
            .map(|t| {
                format!(
                    "{} {} ({})",
                    t.name,
                    grade2readable(Some(t.grade)),
                    grade2readable(Some(t.weight))
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        table.add_row(vec![
            course.id.to_string(),
            course.name.clone(),
            course.credits.to_string(),
            r.tallies.iter().map(|t| t.count).sum::<usize>().to_string(),
            grade2readable(r.grade),
            breakdown,
        ]);
    }

    table.render()
}
