use super::{
    name, Column, Discriminator, Inheritance, Schema, Type, TypeDef, TypeId, TypeNode,
};
use crate::{Error, Result};

use indexmap::IndexMap;

/// Registers types one at a time, validating each declaration against the
/// types already registered.
#[derive(Debug, Default)]
pub struct Builder {
    /// If set, prefix all generated table and view names with this string
    table_name_prefix: Option<String>,

    /// Types as they are registered
    types: Vec<TypeNode>,

    /// Maps type names to identifiers
    names: IndexMap<String, TypeId>,
}

/// Options for [`Builder::relationship`] and [`Builder::collection`].
#[derive(Debug, Clone, Copy)]
pub struct LinkOptions {
    /// Store an `index` column for ordering the entries of one owner.
    pub sorted: bool,

    /// Allow the same pair to be stored more than once.
    pub duplicates: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        LinkOptions {
            sorted: false,
            duplicates: true,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix applied to generated names of types registered afterwards.
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Registers a type, resolving its storage metadata.
    ///
    /// Fails with a configuration error when the declaration conflicts with
    /// its parent or with previously registered types.
    pub fn register(&mut self, def: TypeDef) -> Result<TypeId> {
        let id = TypeId(self.types.len());

        if self.names.contains_key(&def.name) {
            return Err(Error::configuration(format!(
                "type `{}` is registered twice",
                def.name
            )));
        }

        let parent = self.resolve_parent(&def)?;
        let inheritance = self.resolve_inheritance(&def, parent)?;
        let discriminator = self.resolve_discriminator(&def, parent, inheritance)?;
        let (table_name, view_name) = self.resolve_names(&def, parent, inheritance)?;
        let (columns, id_column) =
            self.resolve_columns(&def, parent, inheritance, discriminator.as_ref())?;

        for constraint in &def.unique {
            if let Some(missing) = constraint.iter().find(|c| !columns.contains_key(*c)) {
                return Err(Error::configuration(format!(
                    "unique constraint of `{}` names unknown column `{missing}`",
                    def.name
                )));
            }
        }

        self.types.push(TypeNode {
            id,
            name: def.name.clone(),
            parent,
            children: vec![],
            inheritance,
            table_name,
            view_name,
            discriminator,
            columns,
            id_column,
            unique: def.unique,
        });

        if let Some(parent) = parent {
            self.types[parent.0].children.push(id);
        }

        self.names.insert(def.name, id);
        Ok(id)
    }

    /// Registers a standalone link type relating `owner` to `target`.
    ///
    /// The link type is named after both types (`User` + `Group` ->
    /// `UserGroup`) and stores one key column per side, each referencing the
    /// side's table.
    pub fn relationship(
        &mut self,
        owner: TypeId,
        target: TypeId,
        options: LinkOptions,
    ) -> Result<TypeId> {
        if owner == target {
            return Err(Error::configuration(format!(
                "cannot link `{}` with itself",
                self.get(owner)?.name
            )));
        }

        let (owner_name, owner_column) = self.link_column(owner)?;
        let (target_name, target_column) = self.link_column(target)?;

        let mut def = TypeDef::new(format!("{owner_name}{target_name}"))
            .inheritance(Inheritance::Standalone);

        if !options.duplicates {
            def = def.unique([owner_column.name.clone(), target_column.name.clone()]);
        }

        def = def.column(owner_column).column(target_column);

        if options.sorted {
            def = def.column(Column::new(name::INDEX_COLUMN, Type::Integer(4)));
        }

        self.register(def)
    }

    /// Registers a standalone type holding the values of collection `member`
    /// of `owner`.
    ///
    /// The type is named after the owner and the member (`Group` +
    /// `permissions` -> `GroupPermissions`). Each row stores an `owner_id`
    /// referencing the owner's table and one entry in a column named `value`,
    /// shaped like `column`.
    pub fn collection(
        &mut self,
        owner: TypeId,
        member: &str,
        column: Column,
        options: LinkOptions,
    ) -> Result<TypeId> {
        let (owner_name, owner_column) = self.link_column(owner)?;

        let owner_column = Column {
            name: name::OWNER_COLUMN.to_string(),
            ..owner_column
        };
        let value = Column {
            name: name::VALUE_COLUMN.to_string(),
            ..column
        };

        let mut def = TypeDef::new(format!("{owner_name}{}", std_util::str::upper_camel_case(member)))
            .inheritance(Inheritance::Standalone);

        if !options.duplicates {
            def = def.unique([owner_column.name.clone(), value.name.clone()]);
        }

        def = def.column(owner_column).column(value);

        if options.sorted {
            def = def.column(Column::new(name::INDEX_COLUMN, Type::Integer(4)));
        }

        self.register(def)
    }

    /// Seals the registered types into a [`Schema`].
    pub fn build(self) -> Result<Schema> {
        let schema = Schema::new(self.types, self.names);
        schema.verify()?;
        Ok(schema)
    }

    fn get(&self, id: TypeId) -> Result<&TypeNode> {
        self.types
            .get(id.0)
            .ok_or_else(|| Error::configuration(format!("{id:?} is not registered")))
    }

    fn root(&self, mut id: TypeId) -> &TypeNode {
        while let Some(parent) = self.types[id.0].parent {
            id = parent;
        }
        &self.types[id.0]
    }

    fn key_column(&self, id: TypeId) -> Option<&Column> {
        let root = self.root(id);
        root.id_column
            .as_ref()
            .and_then(|name| root.columns.get(name))
    }

    fn link_column(&self, id: TypeId) -> Result<(String, Column)> {
        let node = self.get(id)?;
        let Some(key) = self.key_column(id) else {
            return Err(Error::configuration(format!(
                "`{}` has no key column to link to",
                node.name
            )));
        };

        // Named from the type alone; the table name prefix stays out of
        // column names.
        let column = Column::new(
            format!("{}_{}", name::view_name(&node.name), name::ID_COLUMN),
            key.ty.clone(),
        )
            .references(&node.table_name, &key.name);

        Ok((node.name.clone(), column))
    }

    fn resolve_parent(&self, def: &TypeDef) -> Result<Option<TypeId>> {
        match def.parents[..] {
            [] => Ok(None),
            [parent] => {
                if parent.0 >= self.types.len() {
                    return Err(Error::configuration(format!(
                        "parent of `{}` is not registered",
                        def.name
                    )));
                }
                Ok(Some(parent))
            }
            _ => Err(Error::configuration(format!(
                "`{}` declares more than one parent",
                def.name
            ))),
        }
    }

    fn resolve_inheritance(&self, def: &TypeDef, parent: Option<TypeId>) -> Result<Inheritance> {
        let Some(parent) = parent else {
            return Ok(def.inheritance.unwrap_or_default());
        };

        let parent = &self.types[parent.0];

        if parent.inheritance.is_standalone() {
            return Err(Error::configuration(format!(
                "`{}` does not support inheritance and cannot be extended by `{}`",
                parent.name, def.name
            )));
        }

        match def.inheritance {
            Some(declared) if declared != parent.inheritance => {
                Err(Error::configuration(format!(
                    "cannot change inheritance of `{}` from {} to {declared} in subtype `{}`",
                    self.root(parent.id).name,
                    parent.inheritance,
                    def.name
                )))
            }
            _ => Ok(parent.inheritance),
        }
    }

    fn resolve_discriminator(
        &self,
        def: &TypeDef,
        parent: Option<TypeId>,
        inheritance: Inheritance,
    ) -> Result<Option<Discriminator>> {
        if inheritance.is_standalone() {
            if def.discriminator_column.is_some() || def.discriminator_value.is_some() {
                return Err(Error::configuration(format!(
                    "standalone type `{}` cannot declare a discriminator",
                    def.name
                )));
            }
            return Ok(None);
        }

        let column = match parent {
            None => def
                .discriminator_column
                .clone()
                .unwrap_or_else(|| name::DISCRIMINATOR_COLUMN.to_string()),
            Some(parent) => {
                let root = self.root(parent);
                let Some(inherited) = &root.discriminator else {
                    return Err(Error::configuration(format!(
                        "`{}` has no discriminator",
                        root.name
                    )));
                };

                if let Some(declared) = &def.discriminator_column {
                    if *declared != inherited.column {
                        return Err(Error::configuration(format!(
                            "discriminator column of `{}` is set by its root `{}`",
                            def.name, root.name
                        )));
                    }
                }
                inherited.column.clone()
            }
        };

        let value = def
            .discriminator_value
            .clone()
            .unwrap_or_else(|| name::discriminator_value(&def.name));

        if let Some(parent) = parent {
            let root = self.root(parent).id;
            let taken = self.types.iter().find(|ty| {
                self.root(ty.id).id == root
                    && ty.discriminator.as_ref().is_some_and(|d| d.value == value)
            });

            if let Some(other) = taken {
                return Err(Error::configuration(format!(
                    "discriminator value `{value}` of `{}` is already used by `{}`",
                    def.name, other.name
                )));
            }
        }

        Ok(Some(Discriminator { column, value }))
    }

    fn resolve_names(
        &self,
        def: &TypeDef,
        parent: Option<TypeId>,
        inheritance: Inheritance,
    ) -> Result<(String, String)> {
        let prefix = self.table_name_prefix.as_deref().unwrap_or("");
        let generated_view = format!("{prefix}{}", name::view_name(&def.name));

        if let (Some(parent), Inheritance::Single) = (parent, inheritance) {
            if def.table_name.is_some() {
                return Err(Error::configuration(format!(
                    "`{}` is stored in the table of `{}` and cannot name its own",
                    def.name,
                    self.root(parent).name
                )));
            }

            let names = (self.root(parent).table_name.clone(), generated_view);
            self.check_view_name(def, &names.1)?;
            return Ok(names);
        }

        let (table, view) = match &def.table_name {
            Some(table) => match table.strip_prefix(name::STORAGE_PREFIX) {
                Some(view) if !view.is_empty() => (table.clone(), view.to_string()),
                _ if inheritance.is_standalone() => (table.clone(), table.clone()),
                _ => {
                    return Err(Error::configuration(format!(
                        "table name `{table}` of `{}` must start with `{}`",
                        def.name,
                        name::STORAGE_PREFIX
                    )))
                }
            },
            None => (format!("{}{generated_view}", name::STORAGE_PREFIX), generated_view),
        };

        if let Some(other) = self
            .types
            .iter()
            .find(|ty| ty.owns_table() && ty.table_name == table)
        {
            return Err(Error::configuration(format!(
                "table `{table}` of `{}` is already used by `{}`",
                def.name, other.name
            )));
        }

        if !inheritance.is_standalone() {
            self.check_view_name(def, &view)?;
        }

        Ok((table, view))
    }

    fn check_view_name(&self, def: &TypeDef, view: &str) -> Result<()> {
        match self
            .types
            .iter()
            .find(|ty| ty.has_view() && ty.view_name == view)
        {
            Some(other) => Err(Error::configuration(format!(
                "view `{view}` of `{}` is already used by `{}`",
                def.name, other.name
            ))),
            None => Ok(()),
        }
    }

    fn resolve_columns(
        &self,
        def: &TypeDef,
        parent: Option<TypeId>,
        inheritance: Inheritance,
        discriminator: Option<&Discriminator>,
    ) -> Result<(IndexMap<String, Column>, Option<String>)> {
        let mut columns = IndexMap::new();

        for column in &def.columns {
            if columns.insert(column.name.clone(), column.clone()).is_some() {
                return Err(Error::configuration(format!(
                    "column `{}` is declared twice on `{}`",
                    column.name, def.name
                )));
            }
        }

        let id_column = match parent {
            Some(parent) => {
                let root = self.root(parent);

                if let Some(pk) = &def.primary_key {
                    return Err(Error::configuration(format!(
                        "`{}` cannot declare primary key `{pk}`; its key is owned by `{}`",
                        def.name, root.name
                    )));
                }

                if inheritance == Inheritance::Single {
                    None
                } else {
                    let Some(key) = self.key_column(parent) else {
                        return Err(Error::configuration(format!(
                            "`{}` has no key column",
                            root.name
                        )));
                    };

                    if columns.contains_key(&key.name) {
                        return Err(Error::configuration(format!(
                            "column `{}` of `{}` collides with the key inherited from `{}`",
                            key.name, def.name, root.name
                        )));
                    }

                    let parent_table = &self.types[parent.0].table_name;
                    columns.shift_insert(0, key.name.clone(), key.inherited_key(parent_table));
                    Some(key.name.clone())
                }
            }
            None => {
                let key = def.primary_key.as_deref().unwrap_or(name::ID_COLUMN);

                match columns.get_mut(key) {
                    Some(column) => {
                        column.primary_key = true;
                        column.nullable = false;
                    }
                    None if def.primary_key.is_some() => {
                        return Err(Error::configuration(format!(
                            "primary key `{key}` is not a column of `{}`",
                            def.name
                        )));
                    }
                    None => {
                        columns.shift_insert(0, key.to_string(), Column::generated_id(key));
                    }
                }

                if let Some(discriminator) = discriminator {
                    if !columns.contains_key(&discriminator.column) {
                        let column = Column::new(
                            &discriminator.column,
                            Type::VarChar(name::DISCRIMINATOR_WIDTH),
                        );
                        let index = columns.get_index_of(key).map_or(0, |i| i + 1);
                        columns.shift_insert(index, discriminator.column.clone(), column);
                    }
                }

                Some(key.to_string())
            }
        };

        Ok((columns, id_column))
    }
}
