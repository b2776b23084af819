use super::{Dialect, ObjectKind};
use crate::Serializer;

use stratum_core::schema::{plan::DropCascadeTrigger, CascadeTrigger};

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn serializer(&self) -> Serializer {
        Serializer::sqlite()
    }

    fn render_create_cascade_trigger(&self, trigger: &CascadeTrigger) -> String {
        let s = self.serializer();
        let key = s.ident(&trigger.key);

        format!(
            "CREATE TRIGGER {} AFTER DELETE ON {} FOR EACH ROW BEGIN DELETE FROM {} WHERE {key} = OLD.{key}; END;",
            s.ident(&trigger.name),
            s.ident(&trigger.table),
            s.ident(&trigger.parent_table),
        )
    }

    fn render_drop_cascade_trigger(&self, trigger: &DropCascadeTrigger) -> String {
        format!(
            "DROP TRIGGER IF EXISTS {};",
            self.serializer().ident(&trigger.name)
        )
    }

    fn destroy_order(&self) -> &'static [ObjectKind] {
        &[ObjectKind::Trigger, ObjectKind::View, ObjectKind::Table]
    }

    /// Dropping a referenced table deletes its rows first, which fails while
    /// referencing rows exist.
    fn render_foreign_keys(&self, enabled: bool) -> Option<String> {
        let state = if enabled { "ON" } else { "OFF" };
        Some(format!("PRAGMA foreign_keys = {state};"))
    }

    fn render_list_objects(&self, kind: ObjectKind) -> Option<String> {
        let ty = match kind {
            ObjectKind::Table => "table",
            ObjectKind::View => "view",
            ObjectKind::Trigger => "trigger",
            ObjectKind::Sequence | ObjectKind::Function => return None,
        };

        Some(format!(
            "SELECT name FROM sqlite_master WHERE type = '{ty}' AND name NOT LIKE 'sqlite_%';"
        ))
    }

    fn render_drop_object(&self, kind: ObjectKind, name: &str) -> Option<String> {
        let keyword = match kind {
            ObjectKind::Table => "TABLE",
            ObjectKind::View => "VIEW",
            ObjectKind::Trigger => "TRIGGER",
            ObjectKind::Sequence | ObjectKind::Function => return None,
        };

        Some(format!(
            "DROP {keyword} IF EXISTS {};",
            self.serializer().ident(name)
        ))
    }
}
