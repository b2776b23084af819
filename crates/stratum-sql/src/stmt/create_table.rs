use super::Statement;

use stratum_core::schema::{Column, TableDefinition};

#[derive(Debug, Clone)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// Column definitions
    pub columns: Vec<Column>,

    /// Primary key columns
    pub primary_key: Vec<String>,

    /// Unique constraints
    pub unique: Vec<Vec<String>>,

    /// Session scoped table, dropped when the connection closes
    pub temporary: bool,

    /// Skip creation when a table of that name exists
    pub if_not_exists: bool,
}

impl Statement {
    /// Creates the table of a type, unless it already exists.
    pub fn create_table(table: &TableDefinition) -> Self {
        CreateTable {
            name: table.name.clone(),
            columns: table.columns.clone(),
            primary_key: table.primary_key.clone(),
            unique: table.unique.clone(),
            temporary: false,
            if_not_exists: true,
        }
        .into()
    }

    /// Creates a session scoped table keyed by `column`.
    pub fn create_temporary_table(name: &str, column: &Column) -> Self {
        CreateTable {
            name: name.to_string(),
            columns: vec![Column {
                name: column.name.clone(),
                ty: column.ty.clone(),
                nullable: false,
                default: None,
                primary_key: true,
                auto_increment: false,
                references: None,
            }],
            primary_key: vec![column.name.clone()],
            unique: vec![],
            temporary: true,
            if_not_exists: false,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
