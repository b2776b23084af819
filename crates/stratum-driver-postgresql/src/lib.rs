mod value;
pub(crate) use value::Value;

use std::borrow::Cow;
use stratum_core::{
    async_trait,
    driver::{
        operation::{ExecSql, QuerySql},
        Capability, Driver, Operation, Response,
    },
    stmt::ValueRecord,
    Error, Result,
};
use tokio_postgres::{tls::MakeTlsConnect, types::ToSql, Client, Config, NoTls, Socket};
use url::Url;

#[derive(Debug)]
pub struct PostgreSQL {
    url: String,
    config: Config,
}

impl PostgreSQL {
    /// Creates a PostgreSQL driver from a connection string.
    ///
    /// No connection is made until the driver is asked for one.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if !matches!(url.scheme(), "postgresql" | "postgres") {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `postgresql` scheme; url={url_str}"
            )));
        }

        let host = url.host_str().ok_or_else(|| {
            Error::invalid_connection_url(format!("missing host in connection URL; url={url_str}"))
        })?;

        let dbname = url.path().trim_start_matches('/');
        if dbname.is_empty() {
            return Err(Error::invalid_connection_url(format!(
                "no database specified - missing path in connection URL; url={url_str}"
            )));
        }

        let mut config = Config::new();
        config.host(host);
        config.dbname(dbname);

        if let Some(port) = url.port() {
            config.port(port);
        }

        if !url.username().is_empty() {
            config.user(url.username());
        }

        if let Some(password) = url.password() {
            config.password(password);
        }

        Ok(Self {
            url: url_str,
            config,
        })
    }

    /// Opens a connection using a custom TLS connector.
    pub async fn connect_with_tls<T>(&self, tls: T) -> Result<Connection>
    where
        T: MakeTlsConnect<Socket> + 'static,
        T::Stream: Send,
    {
        let (client, connection) = self
            .config
            .connect(tls)
            .await
            .map_err(Error::driver_operation_failed)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "postgresql connection error");
            }
        });

        Ok(Connection::new(client))
    }
}

#[async_trait]
impl Driver for PostgreSQL {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    fn capability(&self) -> &'static Capability {
        &Capability::POSTGRESQL
    }

    async fn connect(&self) -> Result<Box<dyn stratum_core::Connection>> {
        Ok(Box::new(self.connect_with_tls(NoTls).await?))
    }
}

#[derive(Debug)]
pub struct Connection {
    /// The PostgreSQL client.
    client: Client,
}

impl Connection {
    /// Wraps an initialized client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn exec_sql(&mut self, op: ExecSql) -> Result<Response> {
        // Trigger installation sends a function and a trigger in one string;
        // only the simple query protocol accepts several statements.
        if op.params.is_empty() {
            self.client
                .batch_execute(&op.sql)
                .await
                .map_err(Error::driver_operation_failed)?;
            return Ok(Response::count(0));
        }

        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        let count = self
            .client
            .execute(&op.sql, &args)
            .await
            .map_err(Error::driver_operation_failed)?;

        Ok(Response::count(count))
    }

    async fn query_sql(&mut self, op: QuerySql) -> Result<Response> {
        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        let rows = self
            .client
            .query(&op.sql, &args)
            .await
            .map_err(Error::driver_operation_failed)?;

        let mut ret = Vec::with_capacity(rows.len());

        for row in &rows {
            let mut items = vec![];
            for (index, column) in row.columns().iter().enumerate() {
                items.push(value::from_row(index, row, column)?);
            }
            ret.push(ValueRecord::from_vec(items));
        }

        Ok(Response::values(ret))
    }
}

impl From<Client> for Connection {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl stratum_core::driver::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::ExecSql(op) => self.exec_sql(op).await,
            Operation::QuerySql(op) => self.query_sql(op).await,
        }
    }
}
