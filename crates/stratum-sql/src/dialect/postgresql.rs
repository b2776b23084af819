use super::{Dialect, ObjectKind};
use crate::Serializer;

use stratum_core::schema::{name, plan::DropCascadeTrigger, CascadeTrigger};

#[derive(Debug, Clone, Copy, Default)]
pub struct Postgresql;

impl Dialect for Postgresql {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn serializer(&self) -> Serializer {
        Serializer::postgresql()
    }

    /// PostgreSQL triggers run a function; one function per parent table is
    /// shared by all of its children.
    fn render_create_cascade_trigger(&self, trigger: &CascadeTrigger) -> String {
        let s = self.serializer();
        let key = s.ident(&trigger.key);
        let function = s.ident(&name::cascade_function(&trigger.parent_table));

        format!(
            "CREATE OR REPLACE FUNCTION {function}() RETURNS TRIGGER AS $_$ \
             BEGIN DELETE FROM {parent} WHERE {key} = OLD.{key}; RETURN OLD; END \
             $_$ LANGUAGE plpgsql; \
             CREATE TRIGGER {name} AFTER DELETE ON {table} FOR EACH ROW EXECUTE PROCEDURE {function}();",
            parent = s.ident(&trigger.parent_table),
            name = s.ident(&trigger.name),
            table = s.ident(&trigger.table),
        )
    }

    fn render_drop_cascade_trigger(&self, trigger: &DropCascadeTrigger) -> String {
        let s = self.serializer();
        format!(
            "DROP TRIGGER IF EXISTS {} ON {};",
            s.ident(&trigger.name),
            s.ident(&trigger.table)
        )
    }

    fn destroy_order(&self) -> &'static [ObjectKind] {
        // Triggers go with their tables and identity sequences with their
        // columns; the sequence pass only catches free-standing ones.
        &[
            ObjectKind::View,
            ObjectKind::Table,
            ObjectKind::Sequence,
            ObjectKind::Function,
        ]
    }

    fn render_list_objects(&self, kind: ObjectKind) -> Option<String> {
        Some(match kind {
            ObjectKind::Table => "SELECT table_name::text FROM information_schema.tables \
                 WHERE table_schema = current_schema() AND table_type = 'BASE TABLE';"
                .to_string(),
            ObjectKind::View => "SELECT table_name::text FROM information_schema.views \
                 WHERE table_schema = current_schema();"
                .to_string(),
            ObjectKind::Sequence => "SELECT sequence_name::text FROM information_schema.sequences \
                 WHERE sequence_schema = current_schema();"
                .to_string(),
            ObjectKind::Function => "SELECT routine_name::text FROM information_schema.routines \
                 WHERE routine_schema = current_schema() AND routine_name LIKE 'autodel%';"
                .to_string(),
            ObjectKind::Trigger => return None,
        })
    }

    fn render_drop_object(&self, kind: ObjectKind, name: &str) -> Option<String> {
        let name = self.serializer().ident(name);

        Some(match kind {
            ObjectKind::Table => format!("DROP TABLE IF EXISTS {name} CASCADE;"),
            ObjectKind::View => format!("DROP VIEW IF EXISTS {name} CASCADE;"),
            ObjectKind::Sequence => format!("DROP SEQUENCE IF EXISTS {name} CASCADE;"),
            ObjectKind::Function => format!("DROP FUNCTION IF EXISTS {name}() CASCADE;"),
            // Triggers are dropped with their tables
            ObjectKind::Trigger => return None,
        })
    }
}
