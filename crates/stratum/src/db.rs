mod builder;
pub use builder::Builder;

mod connect;
pub use connect::Connect;

mod temporary;
pub(crate) use temporary::TemporaryTable;

use crate::{fetch::Fetch, FetchOptions, Records, Result};

use stratum_core::{
    driver::{
        operation::{ExecSql, QuerySql},
        Capability, Connection, Driver, Operation, Response,
    },
    schema::{plan, TypeId},
    stmt::Id,
    Error, Schema,
};
use stratum_sql::Dialect;

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    pub(crate) schema: Arc<Schema>,
    pub(crate) driver: Box<dyn Driver>,
    pub(crate) dialect: Box<dyn Dialect>,

    /// Whether `destroy` may drop the database's objects
    pub(crate) destroyable: bool,

    /// Default identifiers per fetch round trip
    pub(crate) chunk_size: usize,

    /// Names of temporary tables currently in use by any handle
    pub(crate) temporaries: Mutex<HashSet<String>>,
}

/// A database handle. Each instance owns (or will lazily open) a dedicated
/// connection. Cloning produces a new handle that opens its own connection on
/// first use.
pub struct Db {
    pub(crate) shared: Arc<Shared>,
    conn: Option<Box<dyn Connection>>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Lazily open the handle's connection.
    async fn connection(&mut self) -> Result<&mut Box<dyn Connection>> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => {
                tracing::debug!(url = %self.shared.driver.url(), "opening connection");
                self.shared.driver.connect().await?
            }
        };

        Ok(self.conn.insert(conn))
    }

    /// Execute a raw operation on the handle's connection.
    pub async fn exec(&mut self, op: Operation) -> Result<Response> {
        tracing::debug!(
            kind = if op.is_query() { "query" } else { "exec" },
            params = op.params().len(),
            sql = op.sql(),
            "executing statement"
        );

        self.connection().await?.exec(op).await
    }

    async fn exec_ddl(&mut self, sql: String) -> Result<()> {
        self.exec(ExecSql::new(sql).into()).await?;
        Ok(())
    }

    async fn exec_plan(&mut self, operations: &[plan::Operation]) -> Result<()> {
        for op in operations {
            let sql = self.shared.dialect.render_operation(op);
            self.exec_ddl(sql).await?;
        }
        Ok(())
    }

    /// Creates the tables, triggers and views of every registered hierarchy.
    ///
    /// Safe to run against a database where they already exist.
    pub async fn create(&mut self) -> Result<()> {
        let roots: Vec<_> = self.shared.schema.roots().collect();
        let operations = plan::plan_creation(&self.shared.schema, &roots)?;

        self.exec_plan(&operations).await?;

        tracing::info!(
            hierarchies = roots.len(),
            operations = operations.len(),
            "created schema"
        );
        Ok(())
    }

    /// Creates the subtree rooted at `ty` and refreshes its ancestors' views.
    pub async fn create_subtree(&mut self, ty: &str) -> Result<()> {
        let id = self.type_id(ty)?;
        let operations = plan::plan_subtree(&self.shared.schema, id)?;
        self.exec_plan(&operations).await
    }

    /// Runs the work following the creation of `table` by another tool.
    pub async fn table_created(&mut self, table: &str) -> Result<()> {
        let operations = plan::plan_table_created(&self.shared.schema, table)?;
        self.exec_plan(&operations).await
    }

    /// Drops and recreates the view of one type.
    pub async fn create_view(&mut self, ty: &str) -> Result<()> {
        let id = self.type_id(ty)?;

        let mut operations = vec![];
        plan::plan_view(&self.shared.schema, id, &mut operations)?;
        self.exec_plan(&operations).await
    }

    /// Drops the view of one type, if it exists.
    pub async fn drop_view(&mut self, ty: &str) -> Result<()> {
        let id = self.type_id(ty)?;
        let view = self.shared.schema.ty(id).view_name.clone();
        let sql = self.shared.dialect.render_drop_view(&view);
        self.exec_ddl(sql).await
    }

    /// Drops every trigger, view, table and sequence in the database, whether
    /// or not it was created from this schema.
    ///
    /// Refused unless the handle was built as destroyable.
    pub async fn destroy(&mut self) -> Result<()> {
        if !self.shared.destroyable {
            return Err(Error::destroy_refused());
        }

        if let Some(sql) = self.shared.dialect.render_foreign_keys(false) {
            self.exec_ddl(sql).await?;
        }

        let result = self.drop_all().await;

        if let Some(sql) = self.shared.dialect.render_foreign_keys(true) {
            self.exec_ddl(sql).await?;
        }

        let dropped = result?;
        tracing::info!(dropped, "destroyed database");
        Ok(())
    }

    async fn drop_all(&mut self) -> Result<usize> {
        let mut dropped = 0;

        for kind in self.shared.dialect.destroy_order() {
            let Some(list) = self.shared.dialect.render_list_objects(*kind) else {
                continue;
            };

            let rows = self.exec(QuerySql::new(list).into()).await?.into_values()?;

            for row in rows {
                let Some(name) = row.first().and_then(|value| value.as_str()) else {
                    return Err(Error::invalid_result(format!(
                        "expected an object name listing {kind:?}s; row={row:?}"
                    )));
                };

                if let Some(sql) = self.shared.dialect.render_drop_object(*kind, name) {
                    self.exec_ddl(sql).await?;
                    dropped += 1;
                }
            }
        }

        Ok(dropped)
    }

    /// Fetches the records of type `ty` identified by `ids`.
    ///
    /// Options are validated immediately; the returned stream issues its
    /// queries as it is consumed.
    pub fn fetch_by_ids<I>(&mut self, ty: &str, ids: I, options: FetchOptions) -> Result<Records<'_>>
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        let id = self.type_id(ty)?;
        let fetch = Fetch::new(&self.shared, id, options)?;
        let ids = ids.into_iter().map(Into::into).collect();

        Ok(Records::new(fetch.run(self, ids)))
    }

    fn type_id(&self, ty: &str) -> Result<TypeId> {
        self.shared
            .schema
            .type_by_name(ty)
            .map(|ty| ty.id)
            .ok_or_else(|| Error::invalid_statement(format!("unknown type `{ty}`")))
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    pub fn dialect(&self) -> &dyn Dialect {
        &*self.shared.dialect
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.shared.schema
    }

    pub fn capability(&self) -> &'static Capability {
        self.shared.driver.capability()
    }
}

impl Clone for Db {
    fn clone(&self) -> Self {
        Db {
            shared: self.shared.clone(),
            conn: None,
        }
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.shared.driver)
            .field("dialect", &self.shared.dialect.name())
            .field("connected", &self.conn.is_some())
            .finish()
    }
}
