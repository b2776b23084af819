use std_util::prelude::*;
use stratum_core::schema::*;

fn animal_hierarchy(mode: Inheritance) -> (Builder, TypeId) {
    let mut builder = Schema::builder();
    let animal = assert_ok!(builder.register(
        TypeDef::new("Animal")
            .inheritance(mode)
            .column(Column::new("name", Type::Text))
    ));
    (builder, animal)
}

#[test]
fn root_gets_generated_key_and_discriminator() {
    let (builder, animal) = animal_hierarchy(Inheritance::Joined);
    let schema = assert_ok!(builder.build());

    let ty = schema.ty(animal);
    assert_eq!(ty.table_name, "_animal");
    assert_eq!(ty.view_name, "animal");
    assert_eq!(ty.id_column.as_deref(), Some("id"));

    let columns: Vec<_> = ty.columns.keys().map(String::as_str).collect();
    assert_eq!(columns, ["id", "_type", "name"]);

    let discriminator = ty.discriminator.as_ref().unwrap();
    assert_eq!(discriminator.column, "_type");
    assert_eq!(discriminator.value, "animal");

    let id = &ty.columns["id"];
    assert!(id.primary_key);
    assert!(id.auto_increment);
    assert_eq!(id.ty, Type::Id);
}

#[test]
fn joined_subtype_key_references_parent() {
    let (mut builder, animal) = animal_hierarchy(Inheritance::Joined);
    let dog = assert_ok!(builder.register(TypeDef::new("Dog").parent(animal)));
    let puppy = assert_ok!(builder.register(TypeDef::new("Puppy").parent(dog)));
    let schema = assert_ok!(builder.build());

    for (child, parent_table) in [(dog, "_animal"), (puppy, "_dog")] {
        let key = &schema.ty(child).columns["id"];
        assert!(key.primary_key);
        assert!(!key.auto_increment);
        let fk = key.references.as_ref().unwrap();
        assert_eq!(fk.table, parent_table);
        assert_eq!(fk.column, "id");
    }

    assert_eq!(schema.ty(animal).children, [dog]);
    assert_eq!(schema.root(puppy).id, animal);
}

#[test]
fn subtype_inherits_mode() {
    let (mut builder, animal) = animal_hierarchy(Inheritance::Single);
    let cat = assert_ok!(builder.register(TypeDef::new("Cat").parent(animal)));
    let schema = assert_ok!(builder.build());

    let cat = schema.ty(cat);
    assert_eq!(cat.inheritance, Inheritance::Single);
    assert_eq!(cat.table_name, "_animal");
    assert_eq!(cat.view_name, "cat");
    assert_eq!(cat.id_column, None);
    assert!(!cat.owns_table());
}

#[test]
fn cannot_change_inheritance_in_subtype() {
    let (mut builder, animal) = animal_hierarchy(Inheritance::Joined);
    let err = assert_err!(builder.register(
        TypeDef::new("Cat")
            .parent(animal)
            .inheritance(Inheritance::Single)
    ));
    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "configuration error: cannot change inheritance of `Animal` from joined to single in subtype `Cat`"
    );
}

#[test]
fn restating_inheritance_is_allowed() {
    let (mut builder, animal) = animal_hierarchy(Inheritance::Single);
    assert_ok!(builder.register(
        TypeDef::new("Cat")
            .parent(animal)
            .inheritance(Inheritance::Single)
    ));
}

#[test]
fn standalone_types_cannot_be_extended() {
    let (mut builder, tag) = animal_hierarchy(Inheritance::Standalone);
    let err = assert_err!(builder.register(TypeDef::new("Label").parent(tag)));
    assert!(err.is_configuration());
}

#[test]
fn multiple_parents() {
    let mut builder = Schema::builder();
    let a = assert_ok!(builder.register(TypeDef::new("A")));
    let b = assert_ok!(builder.register(TypeDef::new("B")));
    let err = assert_err!(builder.register(TypeDef::new("C").parent(a).parent(b)));
    assert!(err.is_configuration());
}

#[test]
fn unknown_parent() {
    let mut builder = Schema::builder();
    let err = assert_err!(builder.register(TypeDef::new("C").parent(TypeId(7))));
    assert!(err.is_configuration());
}

#[test]
fn duplicate_discriminator_values() {
    let (mut builder, animal) = animal_hierarchy(Inheritance::Joined);
    assert_ok!(builder.register(TypeDef::new("Dog").parent(animal)));
    let err = assert_err!(builder.register(
        TypeDef::new("Hound")
            .parent(animal)
            .discriminator_value("dog")
    ));
    assert!(err.is_configuration());
}

#[test]
fn discriminator_values_are_scoped_to_hierarchy() {
    let mut builder = Schema::builder();
    let animal = assert_ok!(builder.register(TypeDef::new("Animal")));
    let plant = assert_ok!(builder.register(TypeDef::new("Plant")));
    assert_ok!(builder.register(TypeDef::new("Tree").parent(animal).discriminator_value("x")));
    assert_ok!(builder.register(TypeDef::new("Bush").parent(plant).discriminator_value("x")));
    assert_ok!(builder.build());
}

#[test]
fn discriminator_column_is_set_on_root() {
    let mut builder = Schema::builder();
    let animal = assert_ok!(builder.register(TypeDef::new("Animal").discriminator_column("kind")));
    let dog = assert_ok!(builder.register(TypeDef::new("Dog").parent(animal)));

    let err = assert_err!(builder.register(
        TypeDef::new("Cat")
            .parent(animal)
            .discriminator_column("species")
    ));
    assert!(err.is_configuration());

    let schema = assert_ok!(builder.build());
    assert_eq!(schema.ty(dog).discriminator.as_ref().unwrap().column, "kind");
    assert!(schema.ty(animal).columns.contains_key("kind"));
}

#[test]
fn single_subtype_cannot_declare_primary_key() {
    let (mut builder, animal) = animal_hierarchy(Inheritance::Single);
    let err = assert_err!(builder.register(
        TypeDef::new("Cat")
            .parent(animal)
            .column(Column::new("code", Type::Text))
            .primary_key("code")
    ));
    assert!(err.is_configuration());
}

#[test]
fn joined_subtype_cannot_redeclare_key_column() {
    let (mut builder, animal) = animal_hierarchy(Inheritance::Joined);
    let err = assert_err!(builder.register(
        TypeDef::new("Dog")
            .parent(animal)
            .column(Column::new("id", Type::Integer(8)))
    ));
    assert!(err.is_configuration());
}

#[test]
fn explicit_primary_key_on_root() {
    let mut builder = Schema::builder();
    let country = assert_ok!(builder.register(
        TypeDef::new("Country")
            .column(Column::new("code", Type::VarChar(2)))
            .primary_key("code")
    ));
    let state = assert_ok!(builder.register(TypeDef::new("Region").parent(country)));
    let schema = assert_ok!(builder.build());

    assert_eq!(schema.ty(country).id_column.as_deref(), Some("code"));
    assert!(!schema.ty(country).columns.contains_key("id"));

    let key = &schema.ty(state).columns["code"];
    assert_eq!(key.ty, Type::VarChar(2));
    assert_eq!(key.references.as_ref().unwrap().table, "_country");
}

#[test]
fn primary_key_must_be_declared() {
    let mut builder = Schema::builder();
    let err = assert_err!(builder.register(TypeDef::new("Country").primary_key("code")));
    assert!(err.is_configuration());
}

#[test]
fn duplicate_type_and_column_names() {
    let mut builder = Schema::builder();
    assert_ok!(builder.register(TypeDef::new("Animal")));
    assert_err!(builder.register(TypeDef::new("Animal")));

    let err = assert_err!(builder.register(
        TypeDef::new("Plant")
            .column(Column::new("name", Type::Text))
            .column(Column::new("name", Type::Text))
    ));
    assert!(err.is_configuration());
}

#[test]
fn table_name_prefix() {
    let mut builder = Schema::builder();
    builder.table_name_prefix("app_");
    let animal = assert_ok!(builder.register(TypeDef::new("Animal")));
    let schema = assert_ok!(builder.build());

    assert_eq!(schema.ty(animal).table_name, "_app_animal");
    assert_eq!(schema.ty(animal).view_name, "app_animal");
    assert_eq!(schema.type_for_table("_app_animal").unwrap().id, animal);
}

#[test]
fn explicit_table_name_needs_storage_prefix() {
    let mut builder = Schema::builder();
    assert_err!(builder.register(TypeDef::new("Animal").table_name("beasts")));

    let beast = assert_ok!(builder.register(TypeDef::new("Beast").table_name("_beasts")));
    let schema = assert_ok!(builder.build());
    assert_eq!(schema.ty(beast).view_name, "beasts");
}

#[test]
fn table_names_are_unique() {
    let mut builder = Schema::builder();
    assert_ok!(builder.register(TypeDef::new("Animal")));
    let err = assert_err!(builder.register(TypeDef::new("Beast").table_name("_animal")));
    assert!(err.is_configuration());
}

#[test]
fn single_root_table_carries_subtype_columns() {
    let (mut builder, animal) = animal_hierarchy(Inheritance::Single);
    let dog = assert_ok!(builder.register(
        TypeDef::new("Dog")
            .parent(animal)
            .column(Column::new("breed", Type::Text))
            .column(Column::new("name", Type::Integer(4)))
    ));
    assert_ok!(builder.register(
        TypeDef::new("Puppy")
            .parent(dog)
            .column(Column::new("age", Type::Integer(4)))
    ));
    let schema = assert_ok!(builder.build());

    let table = schema.table(animal).unwrap();
    let columns: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(columns, ["id", "_type", "name", "breed", "age"]);
    assert_eq!(table.primary_key, ["id"]);

    // ancestor definition kept
    assert_eq!(table.column("name").unwrap().ty, Type::Text);
    assert!(table.column("breed").unwrap().nullable);
    assert!(table.column("age").unwrap().nullable);

    assert_none!(schema.table(dog));
}

#[test]
fn levels_are_breadth_first() {
    let mut builder = Schema::builder();
    let a = assert_ok!(builder.register(TypeDef::new("A")));
    let b = assert_ok!(builder.register(TypeDef::new("B").parent(a)));
    let c = assert_ok!(builder.register(TypeDef::new("C").parent(a)));
    let d = assert_ok!(builder.register(TypeDef::new("D").parent(b)));
    let schema = assert_ok!(builder.build());

    assert_eq!(schema.levels(a), [vec![a], vec![b, c], vec![d]]);
    assert_eq!(schema.descendants(a), [b, d, c]);
    assert!(schema.roots().eq([a]));
}
