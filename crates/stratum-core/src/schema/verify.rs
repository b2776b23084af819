use super::{Inheritance, Schema, Type, TypeNode};
use crate::{driver::Capability, Error, Result};

use std::collections::HashSet;

pub(super) struct Verify<'a> {
    pub(super) schema: &'a Schema,
}

impl Verify<'_> {
    pub(super) fn verify(&self) -> Result<()> {
        debug_assert!(self.verify_ids_populated());

        for ty in self.schema.types() {
            self.verify_inheritance_is_uniform(ty)?;
            self.verify_key(ty)?;
        }

        self.verify_discriminators_are_unique()?;
        self.verify_table_names_are_unique()?;
        Ok(())
    }

    fn verify_ids_populated(&self) -> bool {
        for (index, ty) in self.schema.types().enumerate() {
            assert_eq!(ty.id.0, index);
            for child in &ty.children {
                assert_eq!(self.schema.ty(*child).parent, Some(ty.id));
            }
        }
        true
    }

    fn verify_inheritance_is_uniform(&self, ty: &TypeNode) -> Result<()> {
        let Some(parent) = ty.parent else {
            return Ok(());
        };
        let parent = self.schema.ty(parent);

        if parent.inheritance.is_standalone() {
            return Err(Error::configuration(format!(
                "`{}` does not support inheritance and cannot be extended by `{}`",
                parent.name, ty.name
            )));
        }

        if parent.inheritance != ty.inheritance {
            return Err(Error::configuration(format!(
                "`{}` uses {} inheritance but its parent `{}` uses {}",
                ty.name, ty.inheritance, parent.name, parent.inheritance
            )));
        }

        Ok(())
    }

    fn verify_key(&self, ty: &TypeNode) -> Result<()> {
        match (ty.parent, ty.inheritance, &ty.id_column) {
            (None, _, Some(key)) if ty.columns.get(key).is_some_and(|c| c.primary_key) => Ok(()),
            (Some(_), Inheritance::Single, None) => Ok(()),
            (Some(parent), Inheritance::Joined, Some(key)) => {
                let parent_table = &self.schema.ty(parent).table_name;
                let references = ty
                    .columns
                    .get(key)
                    .and_then(|column| column.references.as_ref());

                match references {
                    Some(fk) if fk.table == *parent_table => Ok(()),
                    _ => Err(Error::configuration(format!(
                        "key `{key}` of `{}` must reference `{parent_table}`",
                        ty.name
                    ))),
                }
            }
            _ => Err(Error::configuration(format!(
                "`{}` has an invalid key configuration",
                ty.name
            ))),
        }
    }

    fn verify_discriminators_are_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for ty in self.schema.types() {
            let Some(discriminator) = &ty.discriminator else {
                continue;
            };

            let root = self.schema.root(ty.id).id;
            if !seen.insert((root, discriminator.value.as_str())) {
                return Err(Error::configuration(format!(
                    "discriminator value `{}` is used twice in the hierarchy of `{}`",
                    discriminator.value,
                    self.schema.ty(root).name
                )));
            }
        }

        Ok(())
    }

    fn verify_table_names_are_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for ty in self.schema.types().filter(|ty| ty.owns_table()) {
            if !seen.insert(ty.table_name.as_str()) {
                return Err(Error::configuration(format!(
                    "table `{}` is owned by more than one type",
                    ty.table_name
                )));
            }
        }

        Ok(())
    }
}

impl Schema {
    /// Checks every column's storage type against what the engine supports.
    pub fn verify_storage(&self, capability: &Capability) -> Result<()> {
        for ty in self.types() {
            for column in ty.columns.values() {
                let Type::VarChar(size) = column.ty else {
                    continue;
                };

                match capability.storage_types.varchar {
                    Some(max) if size > max => {
                        return Err(Error::configuration(format!(
                            "column `{}` of `{}` is VARCHAR({size}); {} allows at most {max}",
                            column.name, ty.name, capability.engine
                        )));
                    }
                    None => {
                        return Err(Error::configuration(format!(
                            "{} does not support VARCHAR columns",
                            capability.engine
                        )));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}
