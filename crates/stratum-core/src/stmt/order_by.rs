use super::{Direction, OrderByExpr};

/// Ordering for a fetch: one or more columns of the queried type's
/// projection, compared left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub exprs: Vec<OrderByExpr>,
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> OrderBy {
        OrderByExpr::new(column, Direction::Asc).into()
    }

    pub fn desc(column: impl Into<String>) -> OrderBy {
        OrderByExpr::new(column, Direction::Desc).into()
    }

    /// Breaks ties on the terms so far by `column`, ascending.
    pub fn then_asc(mut self, column: impl Into<String>) -> OrderBy {
        self.exprs.push(OrderByExpr::new(column, Direction::Asc));
        self
    }

    /// Breaks ties on the terms so far by `column`, descending.
    pub fn then_desc(mut self, column: impl Into<String>) -> OrderBy {
        self.exprs.push(OrderByExpr::new(column, Direction::Desc));
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.exprs.iter().map(|expr| &expr.column[..])
    }
}

impl From<OrderByExpr> for OrderBy {
    fn from(value: OrderByExpr) -> Self {
        Self { exprs: vec![value] }
    }
}
