use super::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderByExpr {
    /// Column name, as exposed by the type's projection
    pub column: String,

    /// Ascending or descending
    pub direction: Direction,
}

impl OrderByExpr {
    pub fn new(column: impl Into<String>, direction: Direction) -> OrderByExpr {
        OrderByExpr {
            column: column.into(),
            direction,
        }
    }
}
