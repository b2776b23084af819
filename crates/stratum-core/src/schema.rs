mod builder;
pub use builder::{Builder, LinkOptions};

mod column;
pub use column::{Column, ForeignKey};

pub mod name;

pub mod plan;

mod table;
pub use table::TableDefinition;

mod trigger;
pub use trigger::CascadeTrigger;

mod ty;
pub use ty::Type;

mod type_def;
pub use type_def::TypeDef;

mod type_node;
pub use type_node::{Discriminator, Inheritance, TypeId, TypeNode};

mod verify;

mod view;
pub use view::{DiscriminatorFilter, ProjectedColumn, ViewDefinition, ViewSource};

use crate::Result;

use indexmap::IndexMap;
use std::collections::VecDeque;

/// A validated set of type hierarchies.
#[derive(Debug, Default)]
pub struct Schema {
    types: Vec<TypeNode>,

    /// Maps type names to identifiers
    names: IndexMap<String, TypeId>,

    /// Maps physical table names to the type owning the table
    tables: IndexMap<String, TypeId>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn new(types: Vec<TypeNode>, names: IndexMap<String, TypeId>) -> Schema {
        let tables = types
            .iter()
            .filter(|ty| ty.owns_table())
            .map(|ty| (ty.table_name.clone(), ty.id))
            .collect();

        Schema {
            types,
            names,
            tables,
        }
    }

    /// Get a type by ID
    #[track_caller]
    pub fn ty(&self, id: TypeId) -> &TypeNode {
        &self.types[id.0]
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.types.get(id.0)
    }

    pub fn types(&self) -> impl ExactSizeIterator<Item = &TypeNode> + '_ {
        self.types.iter()
    }

    pub fn type_by_name(&self, name: &str) -> Option<&TypeNode> {
        self.names.get(name).map(|id| self.ty(*id))
    }

    /// Finds the type owning the physical table `table`.
    pub fn type_for_table(&self, table: &str) -> Option<&TypeNode> {
        self.tables.get(table).map(|id| self.ty(*id))
    }

    pub fn roots(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types.iter().filter(|ty| ty.is_root()).map(|ty| ty.id)
    }

    pub fn root(&self, id: TypeId) -> &TypeNode {
        self.ancestors(id).last().unwrap_or_else(|| self.ty(id))
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: TypeId) -> impl Iterator<Item = &TypeNode> + '_ {
        let mut next = self.ty(id).parent;
        std::iter::from_fn(move || {
            let ty = self.ty(next?);
            next = ty.parent;
            Some(ty)
        })
    }

    /// The chain of types from the root down to `id`, inclusive.
    pub fn lineage(&self, id: TypeId) -> Vec<&TypeNode> {
        let mut lineage: Vec<_> = self.ancestors(id).collect();
        lineage.reverse();
        lineage.push(self.ty(id));
        lineage
    }

    /// Every type below `id`, depth first in registration order.
    pub fn descendants(&self, id: TypeId) -> Vec<TypeId> {
        let mut out = vec![];
        let mut stack: Vec<_> = self.ty(id).children.iter().rev().copied().collect();

        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.ty(next).children.iter().rev().copied());
        }

        out
    }

    /// The subtree rooted at `id`, grouped by depth.
    pub fn levels(&self, id: TypeId) -> Vec<Vec<TypeId>> {
        let mut levels: Vec<Vec<TypeId>> = vec![];
        let mut queue = VecDeque::from([(id, 0)]);

        while let Some((next, depth)) = queue.pop_front() {
            if levels.len() == depth {
                levels.push(vec![]);
            }
            levels[depth].push(next);
            queue.extend(self.ty(next).children.iter().map(|child| (*child, depth + 1)));
        }

        levels
    }

    /// The key column of `id`'s hierarchy.
    pub fn key_column(&self, id: TypeId) -> Option<&Column> {
        let root = self.root(id);
        root.id_column
            .as_ref()
            .and_then(|name| root.columns.get(name))
    }

    pub(crate) fn verify(&self) -> Result<()> {
        verify::Verify { schema: self }.verify()
    }
}
