use super::Type;
use crate::stmt;

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The database storage type of the column.
    pub ty: Type,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// Value used when an insert omits the column
    pub default: Option<stmt::Value>,

    /// True if the column is the table's primary key
    pub primary_key: bool,

    /// True if the database generates values for the column
    pub auto_increment: bool,

    /// Foreign key, if the column references another table
    pub references: Option<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
}

impl Column {
    /// A non-nullable column without default or constraints.
    pub fn new(name: impl Into<String>, ty: Type) -> Column {
        Column {
            name: name.into(),
            ty,
            nullable: false,
            default: None,
            primary_key: false,
            auto_increment: false,
            references: None,
        }
    }

    /// The generated key column of a hierarchy root.
    pub(crate) fn generated_id(name: &str) -> Column {
        Column {
            primary_key: true,
            auto_increment: true,
            ..Column::new(name, Type::Id)
        }
    }

    pub fn nullable(mut self) -> Column {
        self.nullable = true;
        self
    }

    pub fn default(mut self, value: impl Into<stmt::Value>) -> Column {
        self.default = Some(value.into());
        self
    }

    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Column {
        self.references = Some(ForeignKey {
            table: table.into(),
            column: column.into(),
        });
        self
    }

    /// Copy of the key column suitable for a table whose key refers to it.
    pub(crate) fn inherited_key(&self, parent_table: &str) -> Column {
        Column {
            name: self.name.clone(),
            ty: self.ty.clone(),
            nullable: false,
            default: None,
            primary_key: true,
            auto_increment: false,
            references: Some(ForeignKey {
                table: parent_table.to_string(),
                column: self.name.clone(),
            }),
        }
    }
}
