use super::{Column, Inheritance, Schema, TypeId};

use std::iter;

/// A flattened, read-only view over a type's table and its ancestors' tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefinition {
    pub name: String,
    pub columns: Vec<ProjectedColumn>,
    pub source: ViewSource,
}

/// A view column and the table it is read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedColumn {
    pub table: String,
    pub column: Column,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewSource {
    /// The type's own table joined with each ancestor table on the key
    /// column. Ancestors are listed nearest first.
    Join {
        table: String,
        key: String,
        ancestors: Vec<String>,
    },

    /// A single table, optionally restricted to a set of discriminator values.
    Table {
        table: String,
        filter: Option<DiscriminatorFilter>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscriminatorFilter {
    pub column: String,
    pub values: Vec<String>,
}

impl ProjectedColumn {
    pub fn name(&self) -> &str {
        &self.column.name
    }
}

impl Schema {
    /// Resolves the columns exposed for `id`: its own columns plus every
    /// ancestor's. On a name clash the ancestor's column is kept.
    pub fn projection(&self, id: TypeId) -> Vec<ProjectedColumn> {
        let mut projection: Vec<ProjectedColumn> = vec![];

        for ty in self.lineage(id) {
            for column in ty.columns.values() {
                if projection.iter().any(|p| p.column.name == column.name) {
                    continue;
                }

                projection.push(ProjectedColumn {
                    table: ty.table_name.clone(),
                    column: column.clone(),
                });
            }
        }

        projection
    }

    /// The flattened view for `id`, or `None` for standalone types.
    pub fn view(&self, id: TypeId) -> Option<ViewDefinition> {
        let ty = self.ty(id);

        let source = match ty.inheritance {
            Inheritance::Standalone => return None,
            Inheritance::Joined => ViewSource::Join {
                table: ty.table_name.clone(),
                key: ty.id_column.clone()?,
                ancestors: self.ancestors(id).map(|a| a.table_name.clone()).collect(),
            },
            Inheritance::Single => ViewSource::Table {
                table: ty.table_name.clone(),
                filter: ty.discriminator.as_ref().map(|discriminator| DiscriminatorFilter {
                    column: discriminator.column.clone(),
                    values: iter::once(id)
                        .chain(self.descendants(id))
                        .filter_map(|id| self.ty(id).discriminator.as_ref())
                        .map(|d| d.value.clone())
                        .collect(),
                }),
            },
        };

        Some(ViewDefinition {
            name: ty.view_name.clone(),
            columns: self.projection(id),
            source,
        })
    }
}
