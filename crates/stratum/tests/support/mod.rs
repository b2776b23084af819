#![allow(dead_code)]

use std::{
    borrow::Cow,
    sync::{Arc, Mutex, Once},
};
use stratum::{
    driver::{
        operation::{ExecSql, QuerySql},
        Capability, Connection, Driver, Operation, Response,
    },
    schema::{Column, Inheritance, Schema, Type, TypeDef},
    Db, Record, Result, Value,
};
use stratum_driver_sqlite::Sqlite;

/// Wraps the SQLite driver, recording every operation sent to it.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Sqlite,
    ops: Arc<Mutex<Vec<Operation>>>,
}

#[derive(Debug)]
struct LoggingConnection {
    inner: Box<dyn Connection>,
    ops: Arc<Mutex<Vec<Operation>>>,
}

#[stratum::async_trait]
impl Driver for LoggingDriver {
    fn url(&self) -> Cow<'_, str> {
        self.inner.url()
    }

    fn capability(&self) -> &'static Capability {
        self.inner.capability()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            ops: self.ops.clone(),
        }))
    }
}

#[stratum::async_trait]
impl Connection for LoggingConnection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        self.ops.lock().unwrap().push(op.clone());
        self.inner.exec(op).await
    }
}

/// The operations executed through a [`LoggingDriver`].
pub struct ExecLog {
    ops: Arc<Mutex<Vec<Operation>>>,
}

impl ExecLog {
    pub fn len(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.lock().unwrap().is_empty()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap().clear();
    }

    /// SQL text of every logged operation
    pub fn sql(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .map(|op| op.sql().to_string())
            .collect()
    }

    /// Count operations whose SQL starts with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.sql().iter().filter(|sql| sql.starts_with(prefix)).count()
    }

    /// Parameter counts of operations whose SQL starts with `prefix`
    pub fn params(&self, prefix: &str) -> Vec<usize> {
        self.ops
            .lock()
            .unwrap()
            .iter()
            .filter(|op| op.sql().starts_with(prefix))
            .map(|op| op.params().len())
            .collect()
    }
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// An in-memory database with `schema` created, and the log of operations
/// run after creation.
pub async fn setup(schema: Schema) -> (Db, ExecLog) {
    setup_with(Db::builder().schema(schema)).await
}

pub async fn setup_with(builder: &mut stratum::db::Builder) -> (Db, ExecLog) {
    init_tracing();

    let ops = Arc::new(Mutex::new(vec![]));
    let driver = LoggingDriver {
        inner: Sqlite::in_memory(),
        ops: ops.clone(),
    };

    let mut db = builder.build(driver).await.unwrap();
    db.create().await.unwrap();

    let log = ExecLog { ops };
    log.clear();
    (db, log)
}

/// `Animal` with joined subtypes `Dog`, `Puppy` and `Cat`, plus a standalone
/// `Tag`.
pub fn zoo() -> Schema {
    let mut builder = Schema::builder();
    let animal = builder
        .register(TypeDef::new("Animal").column(Column::new("name", Type::Text)))
        .unwrap();
    let dog = builder
        .register(
            TypeDef::new("Dog")
                .parent(animal)
                .column(Column::new("breed", Type::Text).nullable()),
        )
        .unwrap();
    builder
        .register(
            TypeDef::new("Puppy")
                .parent(dog)
                .column(Column::new("age", Type::Integer(4)).default(0)),
        )
        .unwrap();
    builder
        .register(TypeDef::new("Cat").parent(animal))
        .unwrap();
    builder
        .register(
            TypeDef::new("Tag")
                .inheritance(Inheritance::Standalone)
                .column(Column::new("label", Type::Text)),
        )
        .unwrap();
    builder.build().unwrap()
}

pub async fn exec(db: &mut Db, sql: &str, params: Vec<Value>) {
    let op = ExecSql {
        sql: sql.to_string(),
        params,
    };
    db.exec(op.into()).await.unwrap();
}

pub async fn query(db: &mut Db, sql: &str) -> Vec<Vec<Value>> {
    db.exec(QuerySql::new(sql).into())
        .await
        .unwrap()
        .into_values()
        .unwrap()
        .into_iter()
        .map(|row| row.into_vec())
        .collect()
}

/// Inserts a dog: one row in `_animal` and one in `_dog`.
pub async fn insert_dog(db: &mut Db, id: i64, name: &str, breed: &str) {
    exec(
        db,
        r#"INSERT INTO "_animal" ("id", "_type", "name") VALUES (?1, 'dog', ?2);"#,
        vec![id.into(), name.into()],
    )
    .await;
    exec(
        db,
        r#"INSERT INTO "_dog" ("id", "breed") VALUES (?1, ?2);"#,
        vec![id.into(), breed.into()],
    )
    .await;
}

/// Names of the temporary tables alive on the connection
pub async fn temporary_tables(db: &mut Db) -> Vec<Vec<Value>> {
    query(db, "SELECT name FROM sqlite_temp_master WHERE type = 'table';").await
}

pub fn ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .map(|record| record.id().unwrap().as_int().unwrap())
        .collect()
}
