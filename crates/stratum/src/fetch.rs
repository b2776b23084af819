//! Order-aware retrieval of records by identifier.
//!
//! Identifiers are resolved in bounded chunks so no statement binds more
//! than `chunk_size` parameters. Orders that cannot be applied chunk by
//! chunk sort the identifiers first through a temporary table.

use crate::{
    db::{Shared, TemporaryTable},
    Db, Result,
};

use stratum_core::{
    driver::operation::ExecSql,
    schema::{Column, TypeId},
    stmt::{Id, OrderBy, Record, ValueRecord},
    Error,
};
use stratum_sql::Statement;

use async_stream::try_stream;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tokio_stream::Stream;

#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub order: Order,

    /// Overrides the database's chunk size for this fetch
    pub chunk_size: Option<usize>,

    pub on_missing: Missing,
}

/// Order in which fetched records are yielded.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Order {
    /// Whatever order the database returns.
    Unordered,

    /// The order of the requested identifiers. A duplicated identifier
    /// yields its record again.
    #[default]
    ByRequestOrder,

    /// Sorted on a column of the type's projection. Each record is yielded
    /// once.
    By(OrderBy),
}

/// What to do about requested identifiers with no record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Missing {
    #[default]
    Ignore,

    /// Fail with an `identifier not found` error naming the first missing
    /// identifier, in request order.
    Fail,
}

impl FetchOptions {
    pub fn new() -> FetchOptions {
        FetchOptions::default()
    }

    pub fn order(mut self, order: Order) -> FetchOptions {
        self.order = order;
        self
    }

    pub fn order_by(self, order_by: OrderBy) -> FetchOptions {
        self.order(Order::By(order_by))
    }

    pub fn unordered(self) -> FetchOptions {
        self.order(Order::Unordered)
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> FetchOptions {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn on_missing(mut self, on_missing: Missing) -> FetchOptions {
        self.on_missing = on_missing;
        self
    }

    pub fn fail_on_missing(self) -> FetchOptions {
        self.on_missing(Missing::Fail)
    }
}

impl Missing {
    pub fn is_fail(self) -> bool {
        matches!(self, Missing::Fail)
    }
}

/// A validated fetch of one type.
pub(crate) struct Fetch {
    /// Type name, for error context
    ty: String,

    /// View, or table for standalone types, records are read from
    source: String,

    /// Projected columns, shared by every record
    columns: Arc<[String]>,

    /// Key column and its position in `columns`
    key: Column,
    key_index: usize,

    order: Order,
    chunk_size: usize,
    on_missing: Missing,
}

impl Fetch {
    pub(crate) fn new(shared: &Shared, id: TypeId, options: FetchOptions) -> Result<Fetch> {
        let schema = &shared.schema;
        let ty = schema.ty(id);

        let chunk_size = options.chunk_size.unwrap_or(shared.chunk_size);
        let max = shared.driver.capability().max_parameters;
        if chunk_size == 0 || chunk_size > max {
            return Err(Error::configuration(format!(
                "chunk size must be between 1 and {max}; chunk_size={chunk_size}"
            )));
        }

        let columns: Arc<[String]> = schema
            .projection(id)
            .iter()
            .map(|column| column.name().to_string())
            .collect();

        let Some(key) = schema.key_column(id) else {
            return Err(Error::configuration(format!(
                "`{}` has no key column",
                ty.name
            )));
        };

        let Some(key_index) = columns.iter().position(|column| *column == key.name) else {
            return Err(Error::configuration(format!(
                "key column `{}` is not exposed by `{}`",
                key.name, ty.name
            )));
        };

        if let Order::By(order_by) = &options.order {
            if order_by.exprs.is_empty() {
                return Err(Error::invalid_statement(format!(
                    "cannot order `{}` by an empty expression",
                    ty.name
                )));
            }

            for column in order_by.columns() {
                if !columns.iter().any(|c| c == column) {
                    return Err(Error::invalid_statement(format!(
                        "cannot order `{}` by unknown column `{}`",
                        ty.name, column
                    )));
                }
            }
        }

        Ok(Fetch {
            ty: ty.name.clone(),
            source: ty.source_name().to_string(),
            columns,
            key: key.clone(),
            key_index,
            order: options.order,
            chunk_size,
            on_missing: options.on_missing,
        })
    }

    /// Resolves `ids` lazily, chunk by chunk.
    pub(crate) fn run(self, db: &mut Db, ids: Vec<Id>) -> impl Stream<Item = Result<Record>> + Send + '_ {
        try_stream! {
            if !ids.is_empty() {
                // Large sorted fetches sort the identifiers up front and then
                // materialize them in that order.
                let (ids, order) = match &self.order {
                    Order::By(order_by) if ids.len() > self.chunk_size => {
                        (self.sort(db, &ids, order_by).await?, Order::ByRequestOrder)
                    }
                    order => (ids, order.clone()),
                };

                for (n, chunk) in ids.chunks(self.chunk_size).enumerate() {
                    tracing::debug!(ty = %self.ty, chunk = n, ids = chunk.len(), "fetching chunk");

                    let records = match &order {
                        Order::Unordered => self.unordered(db, chunk).await?,
                        Order::ByRequestOrder => self.by_request_order(db, chunk).await?,
                        Order::By(order_by) => self.ordered(db, chunk, order_by).await?,
                    };

                    for record in records {
                        yield record;
                    }
                }
            }
        }
    }

    async fn unordered(&self, db: &mut Db, chunk: &[Id]) -> Result<Vec<Record>> {
        let distinct = distinct(chunk);
        let records = self.select(db, &distinct, None).await?;
        self.check_missing(chunk, distinct.len(), &records)?;
        Ok(records)
    }

    async fn ordered(&self, db: &mut Db, chunk: &[Id], order_by: &OrderBy) -> Result<Vec<Record>> {
        let distinct = distinct(chunk);
        let records = self.select(db, &distinct, Some(order_by)).await?;
        self.check_missing(chunk, distinct.len(), &records)?;
        Ok(records)
    }

    async fn by_request_order(&self, db: &mut Db, chunk: &[Id]) -> Result<Vec<Record>> {
        let mut by_id = HashMap::new();
        for record in self.select(db, &distinct(chunk), None).await? {
            by_id.insert(record.id()?, record);
        }

        let mut records = Vec::with_capacity(chunk.len());
        for id in chunk {
            match by_id.get(id) {
                Some(record) => records.push(record.clone()),
                None if self.on_missing.is_fail() => return Err(self.not_found(id)),
                None => {}
            }
        }

        Ok(records)
    }

    async fn select(
        &self,
        db: &mut Db,
        ids: &[Id],
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<Record>> {
        let stmt = Statement::select_by_ids(&self.source, &self.columns, &self.key.name, ids, order_by);
        let sql = db.shared.dialect.render(&stmt);
        let rows = db.exec(sql.query()).await?.into_values()?;

        rows.into_iter().map(|row| self.record(row)).collect()
    }

    fn record(&self, row: ValueRecord) -> Result<Record> {
        if row.len() != self.columns.len() {
            return Err(Error::invalid_result(format!(
                "expected {} columns reading `{}`, found {}",
                self.columns.len(),
                self.source,
                row.len()
            )));
        }

        Ok(Record::new(self.columns.clone(), row, self.key_index))
    }

    /// Fails on the first requested identifier absent from `records`, when
    /// configured to. `expected` is the number of distinct identifiers in
    /// `requested`; the set difference only runs when fewer records came back.
    fn check_missing(&self, requested: &[Id], expected: usize, records: &[Record]) -> Result<()> {
        if !self.on_missing.is_fail() || records.len() >= expected {
            return Ok(());
        }

        let found = records.iter().map(Record::id).collect::<Result<HashSet<_>>>()?;
        self.check_found(requested, &found)
    }

    fn check_found(&self, requested: &[Id], found: &HashSet<Id>) -> Result<()> {
        match requested.iter().find(|id| !found.contains(*id)) {
            Some(id) => Err(self.not_found(id)),
            None => Ok(()),
        }
    }

    fn not_found(&self, id: &Id) -> Error {
        Error::identifier_not_found(id.clone()).context(stratum_core::err!("fetching `{}`", self.ty))
    }

    /// Sorts `ids` through a temporary table, returning the identifiers with
    /// a record in the requested order.
    async fn sort(&self, db: &mut Db, ids: &[Id], order_by: &OrderBy) -> Result<Vec<Id>> {
        let distinct = distinct(ids);
        let temporary = TemporaryTable::acquire(&db.shared);

        let create = db
            .shared
            .dialect
            .render_create_temporary_table(temporary.name(), &self.key);
        db.exec(ExecSql::new(create).into()).await?;

        let sorted = self.sort_in(db, temporary.name(), &distinct, order_by).await;

        // The table goes away whether or not sorting succeeded
        let drop_table = db.shared.dialect.render_drop_temporary_table(temporary.name());
        let dropped = db.exec(ExecSql::new(drop_table).into()).await;
        drop(temporary);

        let sorted = sorted?;
        dropped?;

        if self.on_missing.is_fail() && sorted.len() < distinct.len() {
            let found = sorted.iter().cloned().collect();
            self.check_found(ids, &found)?;
        }

        Ok(sorted)
    }

    async fn sort_in(
        &self,
        db: &mut Db,
        temporary: &str,
        ids: &[Id],
        order_by: &OrderBy,
    ) -> Result<Vec<Id>> {
        for chunk in ids.chunks(self.chunk_size) {
            let insert = Statement::insert_ids(temporary, &self.key.name, chunk);
            let sql = db.shared.dialect.render(&insert);
            db.exec(sql.exec()).await?;
        }

        let stmt = Statement::select_sorted_ids(&self.source, &self.key.name, temporary, order_by);
        let sql = db.shared.dialect.render(&stmt);
        let rows = db.exec(sql.query()).await?.into_values()?;

        rows.iter()
            .map(|row| match row.first() {
                Some(value) => Id::try_from(value),
                None => Err(Error::invalid_result("sorted identifier row is empty")),
            })
            .collect()
    }
}

/// `ids` without repeats, first occurrence kept.
fn distinct(ids: &[Id]) -> Vec<Id> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().filter(|id| seen.insert(*id)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_keeps_first_occurrence() {
        let ids: Vec<Id> = [4, 4, 2, 5, 2].into_iter().map(Id::from).collect();
        assert_eq!(distinct(&ids), [Id::from(4), Id::from(2), Id::from(5)]);
    }

    fn dogs(on_missing: Missing) -> Fetch {
        Fetch {
            ty: "Dog".to_string(),
            source: "dog".to_string(),
            columns: vec!["id".to_string()].into(),
            key: Column::new("id", stratum_core::schema::Type::Id),
            key_index: 0,
            order: Order::Unordered,
            chunk_size: 10,
            on_missing,
        }
    }

    fn records(fetch: &Fetch, ids: &[i64]) -> Vec<Record> {
        ids.iter()
            .map(|id| {
                let row = ValueRecord::from_vec(vec![stratum_core::stmt::Value::I64(*id)]);
                Record::new(fetch.columns.clone(), row, fetch.key_index)
            })
            .collect()
    }

    #[test]
    fn missing_check_compares_counts_first() {
        let fetch = dogs(Missing::Fail);
        let requested: Vec<Id> = [1, 2, 2, 3].into_iter().map(Id::from).collect();

        // As many records as distinct identifiers: nothing is missing
        let full = records(&fetch, &[3, 1, 2]);
        assert!(fetch.check_missing(&requested, 3, &full).is_ok());

        let short = records(&fetch, &[3, 1]);
        let err = fetch.check_missing(&requested, 3, &short).unwrap_err();
        assert!(err.is_identifier_not_found());
        assert_eq!(err.missing_identifier(), Some(&Id::from(2)));

        let ignore = dogs(Missing::Ignore);
        assert!(ignore.check_missing(&requested, 3, &short).is_ok());
    }

    #[test]
    fn options_builder() {
        let options = FetchOptions::new()
            .order_by(OrderBy::desc("name"))
            .chunk_size(10)
            .fail_on_missing();

        assert_eq!(options.order, Order::By(OrderBy::desc("name")));
        assert_eq!(options.chunk_size, Some(10));
        assert!(options.on_missing.is_fail());

        let defaults = FetchOptions::default();
        assert_eq!(defaults.order, Order::ByRequestOrder);
        assert_eq!(defaults.on_missing, Missing::Ignore);
    }
}
