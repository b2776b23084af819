use super::{value::Quoted, Comma, Formatter, Ident, Params, Period, ToSql};

use crate::stmt::{
    CreateTable, CreateView, Direction, DropTable, DropView, InsertIds, OrderBy, Select,
    SelectSortedIds, Statement,
};

use stratum_core::schema::ViewSource;

impl ToSql for &Statement {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::CreateView(stmt) => stmt.to_sql(f),
            Statement::DropTable(stmt) => stmt.to_sql(f),
            Statement::DropView(stmt) => stmt.to_sql(f),
            Statement::InsertIds(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::SelectSortedIds(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &CreateTable {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let temporary = if self.temporary { "TEMPORARY " } else { "" };
        let if_not_exists = if self.if_not_exists {
            "IF NOT EXISTS "
        } else {
            ""
        };
        let columns = Comma(&self.columns);

        fmt!(f, "CREATE " temporary "TABLE " if_not_exists Ident(&self.name) " (" columns);

        if !self.primary_key.is_empty() {
            let primary_key = Comma(self.primary_key.iter().map(Ident));
            fmt!(f, ", PRIMARY KEY (" primary_key ")");
        }

        for unique in &self.unique {
            let unique = Comma(unique.iter().map(Ident));
            fmt!(f, ", UNIQUE (" unique ")");
        }

        fmt!(f, ")");
    }
}

impl ToSql for &CreateView {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let columns = Comma(
            self.columns
                .iter()
                .map(|c| Period([Ident(&c.table), Ident(&c.column.name)])),
        );

        fmt!(f, "CREATE VIEW " Ident(&self.name) " AS SELECT " columns " FROM ");

        match &self.source {
            ViewSource::Join {
                table,
                key,
                ancestors,
            } => {
                fmt!(f, Ident(table));

                for ancestor in ancestors {
                    let lhs = Period([Ident(ancestor), Ident(key)]);
                    let rhs = Period([Ident(table), Ident(key)]);
                    fmt!(f, " JOIN " Ident(ancestor) " ON " lhs " = " rhs);
                }
            }
            ViewSource::Table { table, filter } => {
                fmt!(f, Ident(table));

                if let Some(filter) = filter {
                    let column = Period([Ident(table), Ident(&filter.column)]);
                    let values = Comma(filter.values.iter().map(|value| Quoted(value)));
                    fmt!(f, " WHERE " column " IN (" values ")");
                }
            }
        }
    }
}

impl ToSql for &DropTable {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let if_exists = if self.if_exists { "IF EXISTS " } else { "" };
        fmt!(f, "DROP TABLE " if_exists Ident(&self.name));
    }
}

impl ToSql for &DropView {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, "DROP VIEW IF EXISTS " Ident(&self.name));
    }
}

impl ToSql for &InsertIds {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, "INSERT INTO " Ident(&self.table) " (" Ident(&self.column) ") VALUES ");

        let mut s = "";
        for id in &self.ids {
            fmt!(f, s "(" id ")");
            s = ", ";
        }
    }
}

impl ToSql for &Select {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let columns = Comma(self.columns.iter().map(Ident));
        let ids = Comma(&self.ids);

        fmt!(f, "SELECT " columns " FROM " Ident(&self.source) " WHERE " Ident(&self.key) " IN (" ids ")");

        if let Some(order_by) = &self.order_by {
            fmt!(f, " ORDER BY " Terms { table: None, order_by });
        }
    }
}

impl ToSql for &SelectSortedIds {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let source = &self.source;
        let temporary = &self.temporary;
        let key = Period([Ident(source), Ident(&self.key)]);
        let temporary_key = Period([Ident(temporary), Ident(&self.key)]);
        let source_key = Period([Ident(source), Ident(&self.key)]);
        let order_by = Terms {
            table: Some(source),
            order_by: &self.order_by,
        };

        fmt!(f, "SELECT " key " FROM " Ident(source) " JOIN " Ident(temporary) " ON " temporary_key " = " source_key " ORDER BY " order_by);
    }
}

/// `ORDER BY` terms, optionally qualified by a table name.
struct Terms<'a> {
    table: Option<&'a str>,
    order_by: &'a OrderBy,
}

impl ToSql for Terms<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let mut s = "";
        for expr in &self.order_by.exprs {
            let column = Period(self.table.into_iter().chain([&expr.column[..]]).map(Ident));
            fmt!(f, s column expr.direction);
            s = ", ";
        }
    }
}

impl ToSql for Direction {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Direction::Asc => fmt!(f, " ASC"),
            Direction::Desc => fmt!(f, " DESC"),
        }
    }
}
