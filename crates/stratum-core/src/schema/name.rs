//! Naming conventions linking type names, tables and views.
//!
//! A type `PetOwner` is stored in table `_pet_owner` and exposed through the
//! view `pet_owner`: the view takes the bare name and the table carries the
//! storage prefix.

use std_util::str;

/// Prefix separating a physical table name from its view name.
pub const STORAGE_PREFIX: &str = "_";

/// Name of the generated key column.
pub const ID_COLUMN: &str = "id";

/// Column of a collection type referencing its owner.
pub const OWNER_COLUMN: &str = "owner_id";

/// Column of a collection type holding one entry.
pub const VALUE_COLUMN: &str = "value";

/// Ordering column of sorted link and collection types.
pub const INDEX_COLUMN: &str = "index";

/// Default discriminator column for hierarchy roots.
pub const DISCRIMINATOR_COLUMN: &str = "_type";

/// Width of the generated discriminator column.
pub const DISCRIMINATOR_WIDTH: u64 = 100;

/// Bare (view) name for a type, e.g. `PetOwner` -> `pet_owner`.
pub fn view_name(type_name: &str) -> String {
    str::snake_case(type_name)
}

/// Physical table name for a type, e.g. `PetOwner` -> `_pet_owner`.
pub fn table_name(type_name: &str) -> String {
    format!("{STORAGE_PREFIX}{}", view_name(type_name))
}

/// Recovers the type name a table was generated from, e.g. `_pet_owner` ->
/// `PetOwner`. Returns `None` for names lacking the storage prefix.
pub fn type_name(table_name: &str) -> Option<String> {
    let bare = table_name.strip_prefix(STORAGE_PREFIX)?;
    if bare.is_empty() {
        return None;
    }
    Some(str::upper_camel_case(bare))
}

/// Default discriminator value for a type, e.g. `PetOwner` -> `pet_owner`.
pub fn discriminator_value(type_name: &str) -> String {
    str::snake_case(type_name)
}

/// Cascade trigger installed on `table`.
pub fn cascade_trigger(table: &str) -> String {
    format!("autodel{table}")
}

/// Function deleting from `parent_table`, used by engines that route trigger
/// bodies through a stored procedure.
pub fn cascade_function(parent_table: &str) -> String {
    format!("autodel{parent_table}")
}
