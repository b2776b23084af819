//! Engine-specific SQL rendering.
//!
//! View and table syntax is shared; trigger syntax and catalog queries are
//! not, and live in each engine's implementation.

mod postgresql;
pub use postgresql::Postgresql;

mod sqlite;
pub use sqlite::Sqlite;

use crate::{Serializer, Statement};

use stratum_core::{
    driver::{
        operation::{ExecSql, QuerySql},
        Operation,
    },
    schema::{
        plan::{self, DropCascadeTrigger},
        CascadeTrigger, Column, TableDefinition, ViewDefinition,
    },
    stmt::Value,
    Error, Result,
};

use std::fmt;

/// Rendered SQL and its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Sql {
    pub text: String,
    pub params: Vec<Value>,
}

/// Kinds of catalog objects removed when destroying a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Table,
    View,
    Trigger,
    Sequence,
    Function,
}

pub trait Dialect: fmt::Debug + Send + Sync + 'static {
    /// Engine identifier
    fn name(&self) -> &'static str;

    fn serializer(&self) -> Serializer;

    /// Installs a trigger deleting the parent-table row of every deleted row
    /// of `trigger.table`.
    fn render_create_cascade_trigger(&self, trigger: &CascadeTrigger) -> String;

    /// Drops a cascade trigger; succeeds when it does not exist.
    fn render_drop_cascade_trigger(&self, trigger: &DropCascadeTrigger) -> String;

    /// Catalog object kinds dropped by `destroy`, in drop order.
    fn destroy_order(&self) -> &'static [ObjectKind];

    /// Query listing the names of every object of `kind`, or `None` if the
    /// engine drops that kind along with other objects.
    fn render_list_objects(&self, kind: ObjectKind) -> Option<String>;

    /// Drops the named object, or `None` if the engine does not track `kind`.
    fn render_drop_object(&self, kind: ObjectKind, name: &str) -> Option<String>;

    /// Toggles foreign key enforcement for the session, or `None` when
    /// drops cascade on their own.
    fn render_foreign_keys(&self, _enabled: bool) -> Option<String> {
        None
    }

    fn render_create_view(&self, view: &ViewDefinition) -> String {
        self.render_ddl(&Statement::from(view.clone()))
    }

    fn render_drop_view(&self, name: &str) -> String {
        self.render_ddl(&Statement::drop_view(name))
    }

    fn render_create_table(&self, table: &TableDefinition) -> String {
        self.render_ddl(&Statement::create_table(table))
    }

    /// Creates a connection scoped table with a single primary key column
    /// shaped like `column`.
    fn render_create_temporary_table(&self, name: &str, column: &Column) -> String {
        self.render_ddl(&Statement::create_temporary_table(name, column))
    }

    fn render_drop_temporary_table(&self, name: &str) -> String {
        self.render_ddl(&Statement::drop_table_if_exists(name))
    }

    /// Renders a planned DDL step.
    fn render_operation(&self, op: &plan::Operation) -> String {
        match op {
            plan::Operation::CreateTable(table) => self.render_create_table(table),
            plan::Operation::DropCascadeTrigger(trigger) => {
                self.render_drop_cascade_trigger(trigger)
            }
            plan::Operation::CreateCascadeTrigger(trigger) => {
                self.render_create_cascade_trigger(trigger)
            }
            plan::Operation::DropView(view) => self.render_drop_view(&view.name),
            plan::Operation::CreateView(view) => self.render_create_view(view),
        }
    }

    /// Renders a statement, collecting its parameters.
    fn render(&self, stmt: &Statement) -> Sql {
        let mut params = vec![];
        let text = self.serializer().serialize(stmt, &mut params);
        Sql { text, params }
    }

    /// Renders a statement carrying no parameters.
    fn render_ddl(&self, stmt: &Statement) -> String {
        let sql = self.render(stmt);
        debug_assert!(sql.params.is_empty(), "DDL with parameters; sql={sql:?}");
        sql.text
    }
}

impl Sql {
    /// Wraps the SQL as a row-returning operation.
    pub fn query(self) -> Operation {
        QuerySql {
            sql: self.text,
            params: self.params,
        }
        .into()
    }

    /// Wraps the SQL as a statement executed for its side effects.
    pub fn exec(self) -> Operation {
        ExecSql {
            sql: self.text,
            params: self.params,
        }
        .into()
    }
}

/// Selects the dialect for an engine identifier.
pub fn from_name(name: &str) -> Result<Box<dyn Dialect>> {
    match name {
        "sqlite" => Ok(Box::new(Sqlite)),
        "postgresql" | "postgres" => Ok(Box::new(Postgresql)),
        _ => Err(Error::unsupported_dialect(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_by_name() {
        assert_eq!(from_name("sqlite").unwrap().name(), "sqlite");
        assert_eq!(from_name("postgres").unwrap().name(), "postgresql");
        assert_eq!(from_name("postgresql").unwrap().name(), "postgresql");

        let err = from_name("mysql").unwrap_err();
        assert!(err.is_unsupported_dialect());
        assert_eq!(err.to_string(), "unsupported database engine `mysql`");
    }
}
