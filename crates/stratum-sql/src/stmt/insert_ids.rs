use super::{Id, Statement};

/// Inserts one row per identifier into a single-column table.
#[derive(Debug, Clone)]
pub struct InsertIds {
    pub table: String,
    pub column: String,
    pub ids: Vec<Id>,
}

impl Statement {
    pub fn insert_ids(table: &str, column: &str, ids: &[Id]) -> Self {
        InsertIds {
            table: table.to_string(),
            column: column.to_string(),
            ids: ids.to_vec(),
        }
        .into()
    }
}

impl From<InsertIds> for Statement {
    fn from(value: InsertIds) -> Self {
        Self::InsertIds(value)
    }
}
