use super::{Formatter, Params, ToSql};

/// A quoted identifier. Embedded quotes are doubled.
pub(crate) struct Ident<S>(pub(crate) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let name = self.0.as_ref();

        f.dst.push('"');
        for c in name.chars() {
            if c == '"' {
                f.dst.push('"');
            }
            f.dst.push(c);
        }
        f.dst.push('"');
    }
}
