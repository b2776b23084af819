use super::{Id, OrderBy, Statement};

/// Selects the rows of `source` whose key is one of `ids`.
#[derive(Debug, Clone)]
pub struct Select {
    /// View or table to read
    pub source: String,

    /// Projected columns
    pub columns: Vec<String>,

    /// Key column filtered on
    pub key: String,

    pub ids: Vec<Id>,

    pub order_by: Option<OrderBy>,
}

/// Selects the keys of `source` present in `temporary`, sorted.
#[derive(Debug, Clone)]
pub struct SelectSortedIds {
    pub source: String,
    pub key: String,

    /// Temporary table holding the keys, in a column named like `key`
    pub temporary: String,

    pub order_by: OrderBy,
}

impl Statement {
    pub fn select_by_ids(
        source: &str,
        columns: &[String],
        key: &str,
        ids: &[Id],
        order_by: Option<&OrderBy>,
    ) -> Self {
        Select {
            source: source.to_string(),
            columns: columns.to_vec(),
            key: key.to_string(),
            ids: ids.to_vec(),
            order_by: order_by.cloned(),
        }
        .into()
    }

    pub fn select_sorted_ids(source: &str, key: &str, temporary: &str, order_by: &OrderBy) -> Self {
        SelectSortedIds {
            source: source.to_string(),
            key: key.to_string(),
            temporary: temporary.to_string(),
            order_by: order_by.clone(),
        }
        .into()
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}

impl From<SelectSortedIds> for Statement {
    fn from(value: SelectSortedIds) -> Self {
        Self::SelectSortedIds(value)
    }
}
