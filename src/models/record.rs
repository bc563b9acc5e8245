//! Rows read back from a record table.

pub type RecordId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub id: RecordId, // ⇔ <table>.id (INTEGER PRIMARY KEY)
    pub date: String, // ⇔ <table>.date (TEXT "yyyy-MM-dd")
    /// Values of the descriptor columns, in descriptor order (date included).
    pub cells: Vec<String>,
}

impl StoredRow {
    pub fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).map(String::as_str).unwrap_or("")
    }
}
