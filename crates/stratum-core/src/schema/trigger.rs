use super::{name, Inheritance, Schema, TypeId};

/// Deletes the parent-table row matching a deleted child-table row.
///
/// Links a single level: deleting from `_puppy` removes the `_dog` row, and
/// the trigger on `_dog` takes it from there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeTrigger {
    pub name: String,

    /// Table the trigger fires on
    pub table: String,

    /// Nearest ancestor's table
    pub parent_table: String,

    /// Key column shared by both tables
    pub key: String,
}

impl CascadeTrigger {
    pub fn new(table: &str, parent_table: &str, key: &str) -> CascadeTrigger {
        CascadeTrigger {
            name: name::cascade_trigger(table),
            table: table.to_string(),
            parent_table: parent_table.to_string(),
            key: key.to_string(),
        }
    }
}

impl Schema {
    /// The cascade trigger for `id`. Only joined subtypes have one; every
    /// other type either has no parent table or shares it.
    pub fn cascade_trigger(&self, id: TypeId) -> Option<CascadeTrigger> {
        let ty = self.ty(id);
        let parent = self.ty(ty.parent?);

        if ty.inheritance != Inheritance::Joined {
            return None;
        }

        Some(CascadeTrigger::new(
            &ty.table_name,
            &parent.table_name,
            ty.id_column.as_deref()?,
        ))
    }
}
