use super::{Column, Inheritance, Schema, TypeId};

/// Physical shape of a table owned by a type.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<Column>,
    pub primary_key: Vec<String>,
    pub unique: Vec<Vec<String>>,
}

impl TableDefinition {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

impl Schema {
    /// The table created for `id`, or `None` for single-table subtypes.
    ///
    /// A single-table root carries every column its descendants declare.
    /// Those columns are stored nullable since rows of other types in the
    /// hierarchy leave them empty.
    pub fn table(&self, id: TypeId) -> Option<TableDefinition> {
        let ty = self.ty(id);

        if !ty.owns_table() {
            return None;
        }

        let mut columns: Vec<Column> = ty.columns.values().cloned().collect();
        let mut unique = ty.unique.clone();

        if ty.inheritance == Inheritance::Single {
            for descendant in self.descendants(id) {
                let descendant = self.ty(descendant);

                for column in descendant.columns.values() {
                    if columns.iter().any(|existing| existing.name == column.name) {
                        continue;
                    }
                    columns.push(Column {
                        nullable: true,
                        ..column.clone()
                    });
                }

                unique.extend(descendant.unique.iter().cloned());
            }
        }

        Some(TableDefinition {
            name: ty.table_name.clone(),
            columns,
            primary_key: ty.id_column.iter().cloned().collect(),
            unique,
        })
    }
}
