use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: i64,
    pub term_id: i64,
    pub name: String,
    pub number: String,
    pub credits: u32,
    /// Set when one of the course's assignments was modified in memory and
    /// still has to be written back.
    #[serde(skip)]
    pub changed: bool,
}

impl Course {
    pub fn new(id: i64, term_id: i64, name: &str) -> Self {
        Self {
            id,
            term_id,
            name: name.to_string(),
            number: String::new(),
            credits: 0,
            changed: false,
        }
    }

    pub fn mark_changed(&mut self) {
        self.changed = true;
    }
}
