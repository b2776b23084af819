mod config;
pub use config::Config;

pub mod db;
pub use db::Db;

pub mod fetch;
pub use fetch::{FetchOptions, Missing, Order};

pub mod records;
pub use records::Records;

pub use stratum_core::{
    driver,
    schema::{self, Schema},
    stmt::{self, Id, OrderBy, Record, Value},
    Error, Result,
};

pub use stratum_sql::Dialect;

pub use stratum_core::async_trait;
