use super::Operation;
use crate::stmt;

#[derive(Debug, Clone)]
pub struct QuerySql {
    /// The SQL query to execute
    pub sql: String,

    /// Bound parameters, in placeholder order
    pub params: Vec<stmt::Value>,
}

impl QuerySql {
    pub fn new(sql: impl Into<String>) -> QuerySql {
        QuerySql {
            sql: sql.into(),
            params: vec![],
        }
    }
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}
