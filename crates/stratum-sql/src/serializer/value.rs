use super::{Flavor, Formatter, Params, ToSql};

use stratum_core::stmt::Value;

/// Renders a value inline as a SQL literal.
pub(super) struct Literal<'a>(pub(super) &'a Value);

/// A string literal.
pub(super) struct Quoted<'a>(pub(super) &'a str);

impl ToSql for Literal<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        use std::fmt::Write;

        match self.0 {
            Value::Null => fmt!(f, "NULL"),
            Value::Bool(value) => match (f.serializer.flavor, value) {
                (Flavor::Sqlite, true) => fmt!(f, "1"),
                (Flavor::Sqlite, false) => fmt!(f, "0"),
                (Flavor::Postgresql, true) => fmt!(f, "TRUE"),
                (Flavor::Postgresql, false) => fmt!(f, "FALSE"),
            },
            Value::I64(value) => write!(f.dst, "{value}").unwrap(),
            Value::F64(value) => write!(f.dst, "{value:?}").unwrap(),
            Value::String(value) => fmt!(f, Quoted(value)),
            Value::Bytes(bytes) => {
                match f.serializer.flavor {
                    Flavor::Sqlite => f.dst.push_str("X'"),
                    Flavor::Postgresql => f.dst.push_str("'\\x"),
                }
                for byte in bytes {
                    write!(f.dst, "{byte:02x}").unwrap();
                }
                f.dst.push('\'');
            }
        }
    }
}

impl ToSql for Quoted<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push('\'');
        for c in self.0.chars() {
            if c == '\'' {
                f.dst.push('\'');
            }
            f.dst.push(c);
        }
        f.dst.push('\'');
    }
}

/// Identifiers are always bound as parameters.
impl ToSql for &stratum_core::stmt::Id {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let placeholder = f.params.push(&Value::from(self));
        fmt!(f, placeholder);
    }
}
