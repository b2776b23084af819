use super::{Column, Inheritance, TypeId};

/// Declaration of a type, handed to [`Builder::register`](super::Builder::register).
///
/// Everything left unset is derived from the type name and its parent.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub(super) name: String,
    pub(super) parents: Vec<TypeId>,
    pub(super) inheritance: Option<Inheritance>,
    pub(super) table_name: Option<String>,
    pub(super) discriminator_column: Option<String>,
    pub(super) discriminator_value: Option<String>,
    pub(super) primary_key: Option<String>,
    pub(super) columns: Vec<Column>,
    pub(super) unique: Vec<Vec<String>>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> TypeDef {
        TypeDef {
            name: name.into(),
            parents: vec![],
            inheritance: None,
            table_name: None,
            discriminator_column: None,
            discriminator_value: None,
            primary_key: None,
            columns: vec![],
            unique: vec![],
        }
    }

    /// Extends `parent`. Declaring more than one parent is rejected at
    /// registration.
    pub fn parent(mut self, parent: TypeId) -> TypeDef {
        self.parents.push(parent);
        self
    }

    /// Storage strategy. Roots default to [`Inheritance::Joined`]; subtypes
    /// inherit their root's and may only restate it.
    pub fn inheritance(mut self, inheritance: Inheritance) -> TypeDef {
        self.inheritance = Some(inheritance);
        self
    }

    pub fn table_name(mut self, name: impl Into<String>) -> TypeDef {
        self.table_name = Some(name.into());
        self
    }

    /// Overrides the discriminator column. Only allowed on roots.
    pub fn discriminator_column(mut self, column: impl Into<String>) -> TypeDef {
        self.discriminator_column = Some(column.into());
        self
    }

    pub fn discriminator_value(mut self, value: impl Into<String>) -> TypeDef {
        self.discriminator_value = Some(value.into());
        self
    }

    /// Uses one of the declared columns as key instead of generating `id`.
    /// Only allowed on roots.
    pub fn primary_key(mut self, column: impl Into<String>) -> TypeDef {
        self.primary_key = Some(column.into());
        self
    }

    pub fn column(mut self, column: Column) -> TypeDef {
        self.columns.push(column);
        self
    }

    pub fn unique<I, S>(mut self, columns: I) -> TypeDef
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique
            .push(columns.into_iter().map(Into::into).collect());
        self
    }
}
