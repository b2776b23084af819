use super::{Connect, Db, Shared};
use crate::{config::DEFAULT_CHUNK_SIZE, Config, Result};

use stratum_core::{driver::Driver, Error, Schema};
use stratum_sql::dialect;

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

#[derive(Default)]
pub struct Builder {
    /// Sealed type graph
    schema: Option<Schema>,

    destroyable: bool,

    /// Identifiers per fetch round trip; defaults to 100
    chunk_size: Option<usize>,
}

impl Builder {
    /// Set the schema served by the database handle
    pub fn schema(&mut self, schema: Schema) -> &mut Self {
        self.schema = Some(schema);
        self
    }

    /// Allow [`Db::destroy`] to drop every object in the database
    pub fn destroyable(&mut self, destroyable: bool) -> &mut Self {
        self.destroyable = destroyable;
        self
    }

    /// Set the default number of identifiers per fetch round trip
    pub fn chunk_size(&mut self, chunk_size: usize) -> &mut Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Apply the settings of a loaded [`Config`]. The URL is passed to
    /// [`Builder::connect`] separately.
    pub fn config(&mut self, config: &Config) -> &mut Self {
        self.destroyable = config.destroyable;
        self.chunk_size = Some(config.chunk_size);
        self
    }

    /// Connect using the driver selected by the URL scheme
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let Some(schema) = self.schema.take() else {
            return Err(Error::configuration("no schema registered with the builder"));
        };

        let capability = driver.capability();
        schema.verify_storage(capability)?;

        let chunk_size = self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 || chunk_size > capability.max_parameters {
            return Err(Error::configuration(format!(
                "chunk size must be between 1 and {}; chunk_size={chunk_size}",
                capability.max_parameters
            )));
        }

        let dialect = dialect::from_name(capability.engine)?;

        tracing::debug!(
            engine = capability.engine,
            types = schema.types().len(),
            chunk_size,
            "built database handle"
        );

        Ok(Db {
            shared: Arc::new(Shared {
                schema: Arc::new(schema),
                driver: Box::new(driver),
                dialect,
                destroyable: self.destroyable,
                chunk_size,
                temporaries: Mutex::new(HashSet::new()),
            }),
            conn: None,
        })
    }
}
