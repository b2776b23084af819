mod exec_sql;
pub use exec_sql::ExecSql;

mod query_sql;
pub use query_sql::QuerySql;

use crate::stmt;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Execute a SQL statement, returning the number of affected rows
    ExecSql(ExecSql),

    /// Execute a SQL query, returning rows
    QuerySql(QuerySql),
}

impl Operation {
    pub fn sql(&self) -> &str {
        match self {
            Operation::ExecSql(op) => &op.sql,
            Operation::QuerySql(op) => &op.sql,
        }
    }

    /// Bound parameters, in placeholder order.
    pub fn params(&self) -> &[stmt::Value] {
        match self {
            Operation::ExecSql(op) => &op.params,
            Operation::QuerySql(op) => &op.params,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Operation::QuerySql(_))
    }
}
