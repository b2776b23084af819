use super::Shared;

use std::{
    sync::{Arc, PoisonError},
    time::{SystemTime, UNIX_EPOCH},
};

/// Temporary table names are `tmp` followed by fewer than this many digits.
const NAME_SPACE: u128 = 100_000_000;

/// A reserved temporary table name. The reservation is released on drop;
/// dropping the table itself is the holder's job.
pub(crate) struct TemporaryTable {
    shared: Arc<Shared>,
    name: String,
}

impl TemporaryTable {
    /// Reserves a name not used by any live temporary table of the database.
    pub(crate) fn acquire(shared: &Arc<Shared>) -> TemporaryTable {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();

        let mut live = shared
            .temporaries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut n = millis % NAME_SPACE;
        let mut name = format!("tmp{n}");

        while live.contains(&name) {
            n = (n + 1) % NAME_SPACE;
            name = format!("tmp{n}");
        }

        live.insert(name.clone());
        tracing::trace!(name = %name, "acquired temporary table");

        TemporaryTable {
            shared: shared.clone(),
            name,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TemporaryTable {
    fn drop(&mut self) {
        self.shared
            .temporaries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.name);

        tracing::trace!(name = %self.name, "released temporary table");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Db;

    use stratum_core::schema::{Schema, TypeDef};
    use std_util::assert_unique;
    use stratum_driver_sqlite::Sqlite;

    async fn db() -> Db {
        let mut builder = Schema::builder();
        builder.register(TypeDef::new("Animal")).unwrap();

        Db::builder()
            .schema(builder.build().unwrap())
            .build(Sqlite::in_memory())
            .await
            .unwrap()
    }

    fn live(db: &Db) -> usize {
        db.shared.temporaries.lock().unwrap().len()
    }

    #[tokio::test]
    async fn names_never_collide() {
        let db = db().await;

        let tables: Vec<_> = (0..50).map(|_| TemporaryTable::acquire(&db.shared)).collect();
        let names: Vec<_> = tables.iter().map(|t| t.name().to_string()).collect();

        assert!(names.iter().all(|name| name.starts_with("tmp")));
        assert!(names.iter().all(|name| name.len() <= 11));

        assert_unique!(names);
        assert_eq!(live(&db), 50);

        drop(tables);
        assert_eq!(live(&db), 0);
    }

    #[tokio::test]
    async fn shared_between_clones() {
        let db = db().await;
        let other = db.clone();

        let a = TemporaryTable::acquire(&db.shared);
        let b = TemporaryTable::acquire(&other.shared);

        assert_ne!(a.name(), b.name());
        assert_eq!(live(&other), 2);
    }
}
