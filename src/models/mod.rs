pub mod assignment;
pub mod assignment_type;
pub mod category;
pub mod course;
pub mod event;
pub mod gradebook;
pub mod list_item;
pub mod term;

pub use assignment::Assignment;
pub use assignment_type::AssignmentType;
pub use category::Category;
pub use course::Course;
pub use event::Event;
pub use gradebook::Gradebook;
pub use list_item::ListItem;
pub use term::Term;
