use crate::export::ExportFormat;
use crate::core::orderer::SortKey;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rGetOrganized
/// CLI planner for courses, assignments, grades and events, stored in SQLite
#[derive(Parser)]
#[command(
    name = "rgetorganized",
    version = env!("CARGO_PKG_VERSION"),
    about = "A student planner CLI: track assignments, events and weighted course grades using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        /// Only rows of one operation (e.g. parse_error, grade, migration_applied)
        #[arg(long = "op", requires = "print")]
        operation: Option<String>,
    },

    /// Manage terms (semesters, quarters, ...)
    Term {
        #[command(subcommand)]
        action: TermAction,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseAction,
    },

    /// Manage weighted assignment types of a course
    Type {
        #[command(subcommand)]
        action: TypeAction,
    },

    /// Manage event categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Add, edit, grade or complete assignments
    Assignment {
        #[command(subcommand)]
        action: AssignmentAction,
    },

    /// Add or edit calendar events
    Event {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Delete an entry; terms, courses, types and categories take their
    /// dependents with them
    #[command(group(
        ArgGroup::new("target")
            .required(true)
            .args(["term", "course", "type_id", "category", "assignment", "event"])
    ))]
    Del {
        #[arg(long, value_name = "ID")]
        term: Option<i64>,

        #[arg(long, value_name = "ID")]
        course: Option<i64>,

        #[arg(long = "type", value_name = "ID")]
        type_id: Option<i64>,

        #[arg(long, value_name = "ID")]
        category: Option<i64>,

        #[arg(long, value_name = "ID")]
        assignment: Option<i64>,

        #[arg(long, value_name = "ID")]
        event: Option<i64>,
    },

    /// Show the combined schedule of assignments and events
    List {
        /// Sort column (done, name, kind, course, due_date, grade); defaults to the configured one
        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        #[arg(long, conflicts_with = "asc", help = "Sort in descending order")]
        desc: bool,

        #[arg(long, help = "Sort in ascending order")]
        asc: bool,

        /// Id of the item to keep highlighted after sorting
        #[arg(long, value_name = "ID")]
        select: Option<i64>,
    },

    /// Show course and term grades
    Grades {
        /// Only the courses of this term
        #[arg(long, value_name = "ID")]
        term: Option<i64>,
    },

    /// Create a backup copy of the database
    Backup {
        /// Destination file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Compress the backup (zip on Windows, tar.gz on Unix)
        #[arg(long)]
        compress: bool,
    },

    /// Replace the database with a backup (plain, .tar.gz or .zip)
    Restore {
        /// Backup file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Replace the current database without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export the schedule or the grade report
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Export course grades instead of the schedule
        #[arg(long)]
        grades: bool,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum TermAction {
    /// Add a term
    Add {
        name: String,

        /// First day (MM/DD/YYYY, YYYY-MM-DD or "today")
        #[arg(long)]
        start: Option<String>,

        /// Last day (MM/DD/YYYY, YYYY-MM-DD or "today")
        #[arg(long)]
        end: Option<String>,
    },

    /// Rename a term or change its dates
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,
    },

    /// List terms
    List,
}

#[derive(Subcommand)]
pub enum CourseAction {
    /// Add a course to a term
    Add {
        name: String,

        #[arg(long, value_name = "ID")]
        term: i64,

        /// Catalog number (e.g. "CS 101")
        #[arg(long, default_value = "")]
        number: String,

        #[arg(long, default_value_t = 0)]
        credits: u32,
    },

    /// Rename a course or change its number and credits
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        number: Option<String>,

        #[arg(long)]
        credits: Option<u32>,
    },

    /// List courses
    List {
        #[arg(long, value_name = "ID")]
        term: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum TypeAction {
    /// Add an assignment type (homework, exam, ...) to a course
    Add {
        name: String,

        #[arg(long, value_name = "ID")]
        course: i64,

        /// Share of the course grade, e.g. "40", "40%", "2/5"
        #[arg(long)]
        weight: Option<String>,
    },

    /// Change the weight of an assignment type ("" makes it unweighted)
    Weight { id: i64, weight: String },

    /// Rename an assignment type
    Rename { id: i64, name: String },

    /// List assignment types with their weights
    List {
        #[arg(long, value_name = "ID")]
        course: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    /// Add an event category
    Add {
        name: String,

        /// Display color (#RRGGBB)
        #[arg(long)]
        color: Option<String>,
    },

    /// Rename a category or change its color
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// List event categories
    List,
}

#[derive(Subcommand)]
pub enum AssignmentAction {
    /// Add an assignment to a course
    Add {
        name: String,

        #[arg(long, value_name = "ID")]
        course: i64,

        #[arg(long = "type", value_name = "ID")]
        type_id: Option<i64>,

        /// Due date (MM/DD/YYYY, YYYY-MM-DD or "today")
        #[arg(long)]
        due: String,

        /// Due time (h:mm AM/PM or HH:MM), default 12:00 PM
        #[arg(long)]
        time: Option<String>,

        /// 1 (lowest) to 5 (highest)
        #[arg(long, default_value_t = crate::models::assignment::DEFAULT_PRIORITY)]
        priority: u8,

        #[arg(long, default_value = "")]
        comments: String,
    },

    /// Set the grade ("85", "42.5%", "17/20", "17 out of 20"; "" clears it)
    Grade { id: i64, grade: String },

    /// Change name, due date/time, type, priority or comments
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        due: Option<String>,

        #[arg(long)]
        time: Option<String>,

        #[arg(long = "type", value_name = "ID")]
        type_id: Option<i64>,

        #[arg(long)]
        priority: Option<u8>,

        #[arg(long)]
        comments: Option<String>,
    },

    /// Mark an assignment as done
    Done {
        id: i64,

        /// Mark it as not done instead
        #[arg(long)]
        undo: bool,
    },
}

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event
    Add {
        name: String,

        /// Date (MM/DD/YYYY, YYYY-MM-DD or "today")
        #[arg(long)]
        date: String,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long = "all-day", conflicts_with_all = ["start", "end"])]
        all_day: bool,

        #[arg(long, value_name = "ID")]
        category: Option<i64>,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Change an event's name, date, times, category, location or description
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long, value_name = "ID")]
        category: Option<i64>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
}
