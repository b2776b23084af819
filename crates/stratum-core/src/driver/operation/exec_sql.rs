use super::Operation;
use crate::stmt;

/// A statement run for its side effects.
///
/// Without parameters `sql` may hold several `;`-separated statements.
#[derive(Debug, Clone)]
pub struct ExecSql {
    pub sql: String,
    pub params: Vec<stmt::Value>,
}

impl ExecSql {
    pub fn new(sql: impl Into<String>) -> ExecSql {
        ExecSql {
            sql: sql.into(),
            params: vec![],
        }
    }
}

impl From<ExecSql> for Operation {
    fn from(value: ExecSql) -> Self {
        Self::ExecSql(value)
    }
}
