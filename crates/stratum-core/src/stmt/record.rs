use super::{Id, Value, ValueRecord};
use crate::Result;

use std::sync::Arc;

/// A fetched record: the values of one row of a type's projection, addressable
/// by column name.
///
/// The column list is shared by every record produced by the same fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<[String]>,
    values: ValueRecord,
    id_index: usize,
}

impl Record {
    pub fn new(columns: Arc<[String]>, values: ValueRecord, id_index: usize) -> Record {
        debug_assert_eq!(columns.len(), values.len());
        debug_assert!(id_index < columns.len());
        Record {
            columns,
            values,
            id_index,
        }
    }

    /// The record's identifier.
    pub fn id(&self) -> Result<Id> {
        Id::try_from(&self.values[self.id_index])
    }

    /// Returns the value of `column`, if the projection has it.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        Some(&self.values[index])
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values.into_vec()
    }
}
