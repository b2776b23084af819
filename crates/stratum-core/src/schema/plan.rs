//! Turns a schema into the ordered DDL operations realizing it.
//!
//! Every plan is replayable: tables are created only when missing and views
//! and triggers are always dropped before being recreated.

use super::{CascadeTrigger, Schema, TableDefinition, TypeId, TypeNode, ViewDefinition};
use crate::{Error, Result};

/// A single DDL step.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    CreateTable(TableDefinition),
    DropCascadeTrigger(DropCascadeTrigger),
    CreateCascadeTrigger(CascadeTrigger),
    DropView(DropView),
    CreateView(ViewDefinition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropCascadeTrigger {
    pub name: String,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropView {
    pub name: String,
}

/// Plans the creation of every hierarchy rooted at `roots`.
///
/// Each hierarchy is walked breadth first so a table always exists before
/// the views and triggers reading it, and before its subtypes' tables
/// reference it. Hierarchies are planned one after the other in the order
/// given.
pub fn plan_creation(schema: &Schema, roots: &[TypeId]) -> Result<Vec<Operation>> {
    schema.verify()?;

    let mut operations = vec![];

    for root in roots {
        let ty = registered(schema, *root)?;

        if !ty.is_root() {
            return Err(Error::configuration(format!(
                "`{}` is not the root of its hierarchy",
                ty.name
            )));
        }

        plan_levels(schema, *root, &mut operations);
    }

    Ok(operations)
}

/// Plans the subtree rooted at `id` and refreshes its ancestors' views, which
/// resolve columns and discriminator filters from the subtree.
pub fn plan_subtree(schema: &Schema, id: TypeId) -> Result<Vec<Operation>> {
    schema.verify()?;
    registered(schema, id)?;

    let mut operations = vec![];

    let mut ancestors: Vec<_> = schema.ancestors(id).map(|ty| ty.id).collect();
    ancestors.reverse();
    for ancestor in ancestors {
        push_view(schema, ancestor, &mut operations);
    }

    plan_levels(schema, id, &mut operations);
    Ok(operations)
}

/// Plans the work following the creation of `table`, resolving its owner
/// through the table index.
pub fn plan_table_created(schema: &Schema, table: &str) -> Result<Vec<Operation>> {
    let Some(ty) = schema.type_for_table(table) else {
        return Err(Error::configuration(format!(
            "table `{table}` is not owned by any registered type"
        )));
    };

    plan_subtree(schema, ty.id)
}

/// Drops and recreates the view of a single type.
pub fn plan_view(schema: &Schema, id: TypeId, operations: &mut Vec<Operation>) -> Result<()> {
    registered(schema, id)?;
    push_view(schema, id, operations);
    Ok(())
}

fn registered(schema: &Schema, id: TypeId) -> Result<&TypeNode> {
    schema
        .get(id)
        .ok_or_else(|| Error::configuration(format!("{id:?} is not registered")))
}

fn push_view(schema: &Schema, id: TypeId, operations: &mut Vec<Operation>) {
    let ty = schema.ty(id);

    operations.push(Operation::DropView(DropView {
        name: ty.view_name.clone(),
    }));

    if let Some(view) = schema.view(id) {
        operations.push(Operation::CreateView(view));
    }
}

fn plan_levels(schema: &Schema, id: TypeId, operations: &mut Vec<Operation>) {
    for level in schema.levels(id) {
        for ty in level {
            plan_node(schema, ty, operations);
        }
    }
}

fn plan_node(schema: &Schema, id: TypeId, operations: &mut Vec<Operation>) {
    let ty = schema.ty(id);

    if let Some(table) = schema.table(id) {
        operations.push(Operation::CreateTable(table));
    }

    // Single-table subtypes live in their root's table; there is no trigger
    // to drop and no parent row to cascade to.
    if ty.owns_table() {
        let trigger = DropCascadeTrigger {
            name: super::name::cascade_trigger(&ty.table_name),
            table: ty.table_name.clone(),
        };
        operations.push(Operation::DropCascadeTrigger(trigger));
    }

    if let Some(trigger) = schema.cascade_trigger(id) {
        operations.push(Operation::CreateCascadeTrigger(trigger));
    }

    push_view(schema, id, operations);
}
