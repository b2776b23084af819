use super::{Flavor, Formatter, Params, ToSql};

use stratum_core::schema::Type;

impl ToSql for &Type {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        use std::fmt::Write;

        let flavor = f.serializer.flavor;

        match self {
            Type::Boolean => fmt!(f, "BOOLEAN"),
            Type::Id => match flavor {
                // Must read exactly `INTEGER` to alias the rowid
                Flavor::Sqlite => fmt!(f, "INTEGER"),
                Flavor::Postgresql => fmt!(f, "BIGINT"),
            },
            Type::Integer(1..=2) => fmt!(f, "SMALLINT"),
            Type::Integer(3..=4) => fmt!(f, "INTEGER"),
            Type::Integer(_) => fmt!(f, "BIGINT"),
            Type::Float(1..=4) => fmt!(f, "REAL"),
            Type::Float(_) => fmt!(f, "DOUBLE PRECISION"),
            Type::Text => fmt!(f, "TEXT"),
            Type::VarChar(size) => write!(f.dst, "VARCHAR({size})").unwrap(),
            Type::Blob => match flavor {
                Flavor::Sqlite => fmt!(f, "BLOB"),
                Flavor::Postgresql => fmt!(f, "BYTEA"),
            },
            Type::Timestamp => match flavor {
                Flavor::Sqlite => fmt!(f, "TIMESTAMP"),
                Flavor::Postgresql => fmt!(f, "TIMESTAMPTZ"),
            },
            Type::Custom(custom) => fmt!(f, custom),
        }
    }
}
