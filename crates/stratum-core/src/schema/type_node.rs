use super::Column;

use indexmap::IndexMap;
use std::fmt;

/// A registered type and its place in an inheritance hierarchy.
#[derive(Debug, Clone)]
pub struct TypeNode {
    /// Uniquely identifies the type in the schema.
    pub id: TypeId,

    /// Type name, e.g. `Dog`
    pub name: String,

    /// Parent type, `None` for roots
    pub parent: Option<TypeId>,

    /// Direct subtypes, in registration order
    pub children: Vec<TypeId>,

    /// Storage strategy shared by the whole hierarchy
    pub inheritance: Inheritance,

    /// Physical table holding the type's rows. SINGLE subtypes share their
    /// root's table.
    pub table_name: String,

    /// Name of the flattened view; equal to the table name without its
    /// storage prefix.
    pub view_name: String,

    /// Discriminator column and this type's value in it. `None` for
    /// standalone types.
    pub discriminator: Option<Discriminator>,

    /// Columns declared by this type, plus the generated key and
    /// discriminator where this type owns them.
    pub columns: IndexMap<String, Column>,

    /// Name of the key column, if this type's table carries one.
    pub id_column: Option<String>,

    /// Unique constraints over this type's own columns
    pub unique: Vec<Vec<String>>,
}

/// Uniquely identifies a type
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct TypeId(pub usize);

/// How a hierarchy maps onto tables.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Inheritance {
    /// Every type owns a table holding only its declared columns; the key of
    /// each subtype references its parent's table.
    #[default]
    Joined,

    /// The whole hierarchy shares the root's table.
    Single,

    /// The type does not take part in inheritance: no view, no discriminator,
    /// and it cannot be extended.
    Standalone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminator {
    pub column: String,
    pub value: String,
}

impl TypeNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True if creating this type creates a physical table.
    pub fn owns_table(&self) -> bool {
        self.is_root() || self.inheritance != Inheritance::Single
    }

    /// True if the type is exposed through a flattened view.
    pub fn has_view(&self) -> bool {
        self.inheritance != Inheritance::Standalone
    }

    /// The relation fetches read from: the view, or the table for standalone
    /// types.
    pub fn source_name(&self) -> &str {
        if self.has_view() {
            &self.view_name
        } else {
            &self.table_name
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }
}

impl Inheritance {
    pub fn is_standalone(self) -> bool {
        matches!(self, Inheritance::Standalone)
    }
}

impl fmt::Display for Inheritance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Inheritance::Joined => "joined",
            Inheritance::Single => "single",
            Inheritance::Standalone => "standalone",
        })
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TypeId({})", self.0)
    }
}
