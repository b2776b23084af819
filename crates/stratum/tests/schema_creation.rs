mod support;

use pretty_assertions::assert_eq;
use std_util::prelude::*;
use stratum::{
    schema::{Column, Inheritance, Schema, Type, TypeDef},
    Config, Db, FetchOptions, Value,
};
use stratum_driver_sqlite::Sqlite;
use support::*;

/// Names of the catalog objects of `kind`, sorted.
async fn objects(db: &mut Db, kind: &str) -> Vec<String> {
    let sql = format!(
        "SELECT name FROM sqlite_master WHERE type = '{kind}' AND name NOT LIKE 'sqlite_%' ORDER BY name;"
    );

    query(db, &sql)
        .await
        .into_iter()
        .map(|row| match &row[..] {
            [Value::String(name)] => name.clone(),
            row => panic!("unexpected row; row={row:?}"),
        })
        .collect()
}

async fn count(db: &mut Db, table: &str) -> i64 {
    let rows = query(db, &format!(r#"SELECT COUNT(*) FROM "{table}";"#)).await;
    rows[0][0].as_i64().unwrap()
}

#[tokio::test]
async fn creates_tables_views_and_triggers() {
    let (mut db, _log) = setup(zoo()).await;

    assert_eq!(
        objects(&mut db, "table").await,
        ["_animal", "_cat", "_dog", "_puppy", "_tag"]
    );
    assert_eq!(objects(&mut db, "view").await, ["animal", "cat", "dog", "puppy"]);
    assert_eq!(
        objects(&mut db, "trigger").await,
        ["autodel_cat", "autodel_dog", "autodel_puppy"]
    );
}

#[tokio::test]
async fn create_is_replayable() {
    let (mut db, log) = setup(zoo()).await;
    insert_dog(&mut db, 1, "Rex", "boxer").await;

    assert_ok!(db.create().await);
    assert_ok!(db.create().await);

    assert!(log.count("CREATE TABLE IF NOT EXISTS") > 0);
    assert_eq!(count(&mut db, "_animal").await, 1);
    assert_eq!(objects(&mut db, "view").await, ["animal", "cat", "dog", "puppy"]);
}

#[tokio::test]
async fn deleting_a_subtype_row_cascades_to_ancestors() {
    let (mut db, _log) = setup(zoo()).await;

    insert_dog(&mut db, 1, "Rex", "boxer").await;
    insert_dog(&mut db, 2, "Ace", "lab").await;
    exec(&mut db, r#"INSERT INTO "_puppy" ("id") VALUES (2);"#, vec![]).await;

    exec(&mut db, r#"DELETE FROM "_dog" WHERE "id" = 1;"#, vec![]).await;
    assert_eq!(count(&mut db, "_animal").await, 1);

    // Two levels deep
    exec(&mut db, r#"DELETE FROM "_puppy" WHERE "id" = 2;"#, vec![]).await;
    assert_eq!(count(&mut db, "_dog").await, 0);
    assert_eq!(count(&mut db, "_animal").await, 0);
}

#[tokio::test]
async fn subtype_rows_need_a_parent_row() {
    let (mut db, _log) = setup(zoo()).await;

    let op = stratum::driver::operation::ExecSql::new(
        r#"INSERT INTO "_dog" ("id", "breed") VALUES (7, 'pug');"#,
    );
    let err = assert_err!(db.exec(op.into()).await);
    assert!(err.is_driver_operation_failed());
    assert!(err.to_string().contains("FOREIGN KEY"), "{err}");
}

#[tokio::test]
async fn views_flatten_the_lineage() {
    let (mut db, _log) = setup(zoo()).await;

    exec(
        &mut db,
        r#"INSERT INTO "_animal" ("id", "_type", "name") VALUES (3, 'puppy', 'Pip');"#,
        vec![],
    )
    .await;
    exec(&mut db, r#"INSERT INTO "_dog" ("id") VALUES (3);"#, vec![]).await;
    exec(&mut db, r#"INSERT INTO "_puppy" ("id") VALUES (3);"#, vec![]).await;

    let rows = query(&mut db, r#"SELECT * FROM "puppy";"#).await;
    assert_eq!(
        rows,
        [vec![
            Value::I64(3),
            Value::from("puppy"),
            Value::from("Pip"),
            Value::Null,
            Value::I64(0),
        ]]
    );

    // Every puppy is an animal
    let rows = query(&mut db, r#"SELECT "name" FROM "animal";"#).await;
    assert_eq!(rows, [vec![Value::from("Pip")]]);
}

#[tokio::test]
async fn views_can_be_dropped_and_recreated() {
    let (mut db, log) = setup(zoo()).await;

    assert_ok!(db.drop_view("Puppy").await);
    assert_eq!(objects(&mut db, "view").await, ["animal", "cat", "dog"]);

    // Dropping twice is fine
    assert_ok!(db.drop_view("Puppy").await);

    assert_ok!(db.create_view("Puppy").await);
    assert_eq!(objects(&mut db, "view").await, ["animal", "cat", "dog", "puppy"]);

    assert_eq!(log.sql()[0], r#"DROP VIEW IF EXISTS "puppy";"#);

    let err = assert_err!(db.create_view("Unicorn").await);
    assert!(err.is_invalid_statement());
}

#[tokio::test]
async fn table_created_rebuilds_the_subtree() {
    let (mut db, log) = setup(zoo()).await;

    assert_ok!(db.drop_view("Dog").await);
    assert_ok!(db.drop_view("Puppy").await);
    log.clear();

    assert_ok!(db.table_created("_dog").await);

    assert_eq!(objects(&mut db, "view").await, ["animal", "cat", "dog", "puppy"]);
    assert_eq!(
        log.sql()
            .iter()
            .filter(|sql| sql.starts_with("CREATE VIEW"))
            .count(),
        3
    );

    let err = assert_err!(db.table_created("_unicorn").await);
    assert!(err.is_configuration());
}

#[tokio::test]
async fn create_subtree() {
    let (mut db, log) = setup(zoo()).await;

    assert_ok!(db.create_subtree("Dog").await);

    // animal, then dog and puppy
    assert_eq!(log.count("CREATE VIEW"), 3);
    assert_eq!(log.count("CREATE TABLE IF NOT EXISTS"), 2);
    assert_eq!(log.count("CREATE TRIGGER"), 2);
}

#[tokio::test]
async fn single_table_hierarchy() {
    let mut builder = Schema::builder();
    let animal = assert_ok!(builder.register(
        TypeDef::new("Animal")
            .inheritance(Inheritance::Single)
            .column(Column::new("name", Type::Text))
    ));
    let dog = assert_ok!(builder.register(
        TypeDef::new("Dog")
            .parent(animal)
            .column(Column::new("breed", Type::Text))
    ));
    assert_ok!(builder.register(TypeDef::new("Puppy").parent(dog)));
    assert_ok!(builder.register(TypeDef::new("Cat").parent(animal)));
    let (mut db, _log) = setup(assert_ok!(builder.build())).await;

    assert_eq!(objects(&mut db, "table").await, ["_animal"]);
    assert_eq!(objects(&mut db, "view").await, ["animal", "cat", "dog", "puppy"]);
    assert!(objects(&mut db, "trigger").await.is_empty());

    // Subtype columns are nullable so cats can omit a breed
    exec(
        &mut db,
        r#"INSERT INTO "_animal" ("id", "_type", "name", "breed") VALUES (1, 'dog', 'Rex', 'boxer'), (2, 'puppy', 'Pip', 'pug'), (3, 'cat', 'Tom', NULL);"#,
        vec![],
    )
    .await;

    let dogs = query(&mut db, r#"SELECT "id" FROM "dog" ORDER BY "id";"#).await;
    assert_eq!(dogs, [vec![Value::I64(1)], vec![Value::I64(2)]]);

    let cats = query(&mut db, r#"SELECT "id" FROM "cat";"#).await;
    assert_eq!(cats, [vec![Value::I64(3)]]);

    let animals = query(&mut db, r#"SELECT COUNT(*) FROM "animal";"#).await;
    assert_eq!(animals, [vec![Value::I64(3)]]);
}

#[tokio::test]
async fn single_table_root_view_excludes_unknown_tags() {
    let mut builder = Schema::builder();
    let animal = assert_ok!(builder.register(
        TypeDef::new("Animal")
            .inheritance(Inheritance::Single)
            .column(Column::new("name", Type::Text))
    ));
    assert_ok!(builder.register(TypeDef::new("Dog").parent(animal)));
    let (mut db, _log) = setup(assert_ok!(builder.build())).await;

    exec(
        &mut db,
        r#"INSERT INTO "_animal" ("id", "_type", "name") VALUES (1, 'animal', 'Blob'), (2, 'dog', 'Rex'), (3, 'ghost', 'Boo');"#,
        vec![],
    )
    .await;

    let animals = query(&mut db, r#"SELECT "id" FROM "animal" ORDER BY "id";"#).await;
    assert_eq!(animals, [vec![Value::I64(1)], vec![Value::I64(2)]]);

    let dogs = query(&mut db, r#"SELECT "id" FROM "dog";"#).await;
    assert_eq!(dogs, [vec![Value::I64(2)]]);
}

#[tokio::test]
async fn destroy_requires_opt_in() {
    let (mut db, log) = setup(zoo()).await;

    let err = assert_err!(db.destroy().await);
    assert!(err.is_destroy_refused());
    assert!(log.is_empty());
    assert_eq!(objects(&mut db, "table").await.len(), 5);
}

#[tokio::test]
async fn destroy_drops_everything() {
    let (mut db, log) = setup_with(Db::builder().schema(zoo()).destroyable(true)).await;
    insert_dog(&mut db, 1, "Rex", "boxer").await;

    // Objects not created from the schema go too
    exec(&mut db, r#"CREATE TABLE "unrelated" ("x" INTEGER);"#, vec![]).await;
    log.clear();

    assert_ok!(db.destroy().await);
    let sql = log.sql();

    for kind in ["table", "view", "trigger"] {
        assert!(objects(&mut db, kind).await.is_empty(), "{kind}");
    }

    assert_eq!(sql.first().map(String::as_str), Some("PRAGMA foreign_keys = OFF;"));
    assert_eq!(sql.last().map(String::as_str), Some("PRAGMA foreign_keys = ON;"));
    assert_eq!(log.count("DROP TRIGGER"), 3);
    assert_eq!(log.count("DROP VIEW"), 4);
    assert_eq!(log.count("DROP TABLE"), 6);

    // The database can be created again afterwards
    assert_ok!(db.create().await);
    assert_eq!(objects(&mut db, "table").await.len(), 5);
}

#[tokio::test]
async fn builder_applies_config() {
    let config: Config = assert_ok!(serde_json::from_str(
        r#"{ "url": "sqlite::memory:", "destroyable": true, "chunk_size": 2 }"#
    ));

    let (mut db, log) = setup_with(Db::builder().schema(zoo()).config(&config)).await;
    for id in 1..=3 {
        insert_dog(&mut db, id, "Rex", "boxer").await;
    }
    log.clear();

    let records = assert_ok!(
        assert_ok!(db.fetch_by_ids("Dog", [1, 2, 3], FetchOptions::default()))
            .collect::<Vec<_>>()
            .await
    );
    assert_eq!(ids(&records), [1, 2, 3]);
    assert_eq!(log.params("SELECT"), [2, 1]);

    assert_ok!(db.destroy().await);
}

#[tokio::test]
async fn builder_rejects_bad_settings() {
    let err = assert_err!(Db::builder().build(Sqlite::in_memory()).await);
    assert!(err.is_configuration());

    let err = assert_err!(
        Db::builder()
            .schema(zoo())
            .chunk_size(0)
            .build(Sqlite::in_memory())
            .await
    );
    assert!(err.is_configuration());

    // More parameters than SQLite binds in one statement
    let err = assert_err!(
        Db::builder()
            .schema(zoo())
            .chunk_size(50_000)
            .build(Sqlite::in_memory())
            .await
    );
    assert!(err.is_configuration());
}

#[tokio::test]
async fn connect_by_url() {
    let err = assert_err!(Db::builder().schema(zoo()).connect("mysql://localhost/zoo").await);
    assert!(err.is_invalid_connection_url());

    let err = assert_err!(Db::builder().schema(zoo()).connect("not a url").await);
    assert!(err.is_invalid_connection_url());

    let res = Db::builder().schema(zoo()).connect("sqlite::memory:").await;

    if cfg!(feature = "sqlite") {
        let mut db = assert_ok!(res);
        assert_ok!(db.create().await);
    } else {
        assert_err!(res);
    }
}
