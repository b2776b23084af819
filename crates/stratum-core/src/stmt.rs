mod direction;
pub use direction::Direction;

mod id;
pub use id::Id;

mod order_by;
pub use order_by::OrderBy;

mod order_by_expr;
pub use order_by_expr::OrderByExpr;

mod record;
pub use record::Record;

mod value;
pub use value::Value;

mod value_record;
pub use value_record::ValueRecord;
