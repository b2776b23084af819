use super::{value::Literal, Flavor, Formatter, Ident, Params, ToSql};

use stratum_core::schema::Column;

impl ToSql for &Column {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let ty = &self.ty;
        fmt!(f, Ident(&self.name) " " ty);

        if self.auto_increment {
            match f.serializer.flavor {
                // An `INTEGER` primary key already aliases the rowid
                Flavor::Sqlite => return,
                Flavor::Postgresql => fmt!(f, " GENERATED BY DEFAULT AS IDENTITY"),
            }
        }

        if !self.nullable {
            fmt!(f, " NOT NULL");
        }

        if let Some(default) = &self.default {
            fmt!(f, " DEFAULT " Literal(default));
        }

        if let Some(fk) = &self.references {
            fmt!(f, " REFERENCES " Ident(&fk.table) " (" Ident(&fk.column) ")");
        }
    }
}
