pub mod dialect;
pub use dialect::{Dialect, ObjectKind, Postgresql, Sql, Sqlite};

pub mod serializer;
pub use serializer::{Params, Serializer};

pub mod stmt;
pub use stmt::Statement;
