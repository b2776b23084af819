use pretty_assertions::assert_eq;
use std_util::prelude::*;
use stratum_core::schema::*;

fn names(view: &ViewDefinition) -> Vec<(&str, &str)> {
    view.columns
        .iter()
        .map(|p| (p.table.as_str(), p.name()))
        .collect()
}

#[test]
fn joined_view_joins_every_ancestor() {
    let mut builder = Schema::builder();
    let animal = assert_ok!(builder.register(
        TypeDef::new("Animal").column(Column::new("name", Type::Text))
    ));
    let dog = assert_ok!(builder.register(
        TypeDef::new("Dog")
            .parent(animal)
            .column(Column::new("breed", Type::Text))
    ));
    let puppy = assert_ok!(builder.register(
        TypeDef::new("Puppy")
            .parent(dog)
            .column(Column::new("age", Type::Integer(4)))
    ));
    let schema = assert_ok!(builder.build());

    let view = schema.view(puppy).unwrap();
    assert_eq!(view.name, "puppy");
    assert_eq!(
        names(&view),
        [
            ("_animal", "id"),
            ("_animal", "_type"),
            ("_animal", "name"),
            ("_dog", "breed"),
            ("_puppy", "age"),
        ]
    );
    assert_eq!(
        view.source,
        ViewSource::Join {
            table: "_puppy".to_string(),
            key: "id".to_string(),
            ancestors: vec!["_dog".to_string(), "_animal".to_string()],
        }
    );
}

#[test]
fn ancestor_column_wins() {
    let mut builder = Schema::builder();
    let a = assert_ok!(builder.register(
        TypeDef::new("A").column(Column::new("x", Type::Integer(8)))
    ));
    let b = assert_ok!(builder.register(
        TypeDef::new("B")
            .parent(a)
            .column(Column::new("x", Type::Text))
    ));
    let schema = assert_ok!(builder.build());

    let projection = schema.projection(b);
    let x: Vec<_> = projection.iter().filter(|p| p.name() == "x").collect();
    assert_eq!(x.len(), 1);
    assert_eq!(x[0].table, "_a");
    assert_eq!(x[0].column.ty, Type::Integer(8));
}

#[test]
fn single_views_filter_by_subtree_tags() {
    let mut builder = Schema::builder();
    let animal = assert_ok!(builder.register(
        TypeDef::new("Animal").inheritance(Inheritance::Single)
    ));
    let dog = assert_ok!(builder.register(TypeDef::new("Dog").parent(animal)));
    let cat = assert_ok!(builder.register(TypeDef::new("Cat").parent(animal)));
    assert_ok!(builder.register(TypeDef::new("Puppy").parent(dog)));
    assert_ok!(builder.register(TypeDef::new("Kitten").parent(cat)));
    let schema = assert_ok!(builder.build());

    let filter = |id| match schema.view(id).unwrap().source {
        ViewSource::Table { table, filter } => {
            assert_eq!(table, "_animal");
            filter.map(|f| f.values)
        }
        source => panic!("unexpected source {source:?}"),
    };

    assert_eq!(
        filter(animal),
        Some(vec![
            "animal".to_string(),
            "dog".to_string(),
            "puppy".to_string(),
            "cat".to_string(),
            "kitten".to_string(),
        ])
    );
    assert_eq!(
        filter(dog),
        Some(vec!["dog".to_string(), "puppy".to_string()])
    );
    assert_eq!(
        filter(cat),
        Some(vec!["cat".to_string(), "kitten".to_string()])
    );
}

#[test]
fn standalone_has_no_view() {
    let mut builder = Schema::builder();
    let tag = assert_ok!(builder.register(
        TypeDef::new("Tag").inheritance(Inheritance::Standalone)
    ));
    let schema = assert_ok!(builder.build());

    assert_none!(schema.view(tag));
    assert_eq!(schema.ty(tag).source_name(), "_tag");
    assert_none!(schema.ty(tag).discriminator);
}

#[test]
fn cascade_triggers_link_one_level() {
    let mut builder = Schema::builder();
    let animal = assert_ok!(builder.register(TypeDef::new("Animal")));
    let dog = assert_ok!(builder.register(TypeDef::new("Dog").parent(animal)));
    let puppy = assert_ok!(builder.register(TypeDef::new("Puppy").parent(dog)));
    let schema = assert_ok!(builder.build());

    assert_eq!(schema.cascade_trigger(animal), None);
    assert_eq!(
        schema.cascade_trigger(puppy),
        Some(CascadeTrigger {
            name: "autodel_puppy".to_string(),
            table: "_puppy".to_string(),
            parent_table: "_dog".to_string(),
            key: "id".to_string(),
        })
    );
}
