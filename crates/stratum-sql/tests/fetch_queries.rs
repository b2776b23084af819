use pretty_assertions::assert_eq;
use stratum_core::{
    schema::{Column, Type},
    stmt::{Id, OrderBy, Value},
};
use stratum_sql::{Dialect, Postgresql, Sqlite, Statement};

fn columns() -> Vec<String> {
    vec!["id".to_string(), "name".to_string()]
}

#[test]
fn select_by_ids() {
    let ids = [Id::from(4), Id::from(2), Id::from(5)];
    let stmt = Statement::select_by_ids("dog", &columns(), "id", &ids, None);

    let sql = Sqlite.render(&stmt);
    assert_eq!(
        sql.text,
        r#"SELECT "id", "name" FROM "dog" WHERE "id" IN (?1, ?2, ?3);"#
    );
    assert_eq!(sql.params, [Value::I64(4), Value::I64(2), Value::I64(5)]);

    let sql = Postgresql.render(&stmt);
    assert_eq!(
        sql.text,
        r#"SELECT "id", "name" FROM "dog" WHERE "id" IN ($1, $2, $3);"#
    );
}

#[test]
fn select_by_ids_ordered() {
    let ids = [Id::from("a"), Id::from("b")];
    let order_by = OrderBy::desc("name");
    let stmt = Statement::select_by_ids("dog", &columns(), "id", &ids, Some(&order_by));

    let sql = Sqlite.render(&stmt);
    assert_eq!(
        sql.text,
        r#"SELECT "id", "name" FROM "dog" WHERE "id" IN (?1, ?2) ORDER BY "name" DESC;"#
    );
    assert_eq!(sql.params, [Value::from("a"), Value::from("b")]);
}

#[test]
fn composite_order() {
    let ids = [Id::from(1), Id::from(2)];
    let order_by = OrderBy::asc("breed").then_desc("name");

    let select = Statement::select_by_ids("dog", &columns(), "id", &ids, Some(&order_by));
    assert_eq!(
        Postgresql.render(&select).text,
        r#"SELECT "id", "name" FROM "dog" WHERE "id" IN ($1, $2) ORDER BY "breed" ASC, "name" DESC;"#
    );

    let sorted = Statement::select_sorted_ids("dog", "id", "tmp12345678", &order_by);
    assert_eq!(
        Sqlite.render(&sorted).text,
        r#"SELECT "dog"."id" FROM "dog" JOIN "tmp12345678" ON "tmp12345678"."id" = "dog"."id" ORDER BY "dog"."breed" ASC, "dog"."name" DESC;"#
    );
}

#[test]
fn temporary_table_round_trip() {
    let key = Column::new("id", Type::Id);

    assert_eq!(
        Sqlite.render_create_temporary_table("tmp12345678", &key),
        r#"CREATE TEMPORARY TABLE "tmp12345678" ("id" INTEGER NOT NULL, PRIMARY KEY ("id"));"#
    );
    assert_eq!(
        Postgresql.render_create_temporary_table("tmp12345678", &key),
        r#"CREATE TEMPORARY TABLE "tmp12345678" ("id" BIGINT NOT NULL, PRIMARY KEY ("id"));"#
    );

    let insert = Sqlite.render(&Statement::insert_ids(
        "tmp12345678",
        "id",
        &[Id::from(1), Id::from(2)],
    ));
    assert_eq!(
        insert.text,
        r#"INSERT INTO "tmp12345678" ("id") VALUES (?1), (?2);"#
    );

    let sorted = Postgresql.render(&Statement::select_sorted_ids(
        "dog",
        "id",
        "tmp12345678",
        &OrderBy::asc("name"),
    ));
    assert_eq!(
        sorted.text,
        r#"SELECT "dog"."id" FROM "dog" JOIN "tmp12345678" ON "tmp12345678"."id" = "dog"."id" ORDER BY "dog"."name" ASC;"#
    );
    assert!(sorted.params.is_empty());

    assert_eq!(
        Sqlite.render_drop_temporary_table("tmp12345678"),
        r#"DROP TABLE IF EXISTS "tmp12345678";"#
    );
}

#[test]
fn catalog() {
    use stratum_sql::ObjectKind;

    assert_eq!(
        Sqlite.render_list_objects(ObjectKind::View).as_deref(),
        Some("SELECT name FROM sqlite_master WHERE type = 'view' AND name NOT LIKE 'sqlite_%';")
    );
    assert_eq!(Sqlite.render_list_objects(ObjectKind::Sequence), None);
    assert_eq!(
        Sqlite.render_drop_object(ObjectKind::Trigger, "autodel_dog").as_deref(),
        Some(r#"DROP TRIGGER IF EXISTS "autodel_dog";"#)
    );
    assert_eq!(
        Postgresql.render_drop_object(ObjectKind::Table, "_dog").as_deref(),
        Some(r#"DROP TABLE IF EXISTS "_dog" CASCADE;"#)
    );
    assert_eq!(Postgresql.render_list_objects(ObjectKind::Trigger), None);

    assert_eq!(
        Sqlite.render_foreign_keys(false).as_deref(),
        Some("PRAGMA foreign_keys = OFF;")
    );
    assert_eq!(Postgresql.render_foreign_keys(false), None);
}
