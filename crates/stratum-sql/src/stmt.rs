mod create_table;
pub use create_table::CreateTable;

mod drop_table;
pub use drop_table::DropTable;

mod drop_view;
pub use drop_view::DropView;

mod insert_ids;
pub use insert_ids::InsertIds;

mod select;
pub use select::{Select, SelectSortedIds};

pub use stratum_core::schema::ViewDefinition as CreateView;
pub use stratum_core::stmt::{Direction, Id, OrderBy, OrderByExpr, Value};

#[derive(Debug, Clone)]
pub enum Statement {
    CreateTable(CreateTable),
    CreateView(CreateView),
    DropTable(DropTable),
    DropView(DropView),
    InsertIds(InsertIds),
    Select(Select),
    SelectSortedIds(SelectSortedIds),
}

impl From<CreateView> for Statement {
    fn from(value: CreateView) -> Self {
        Statement::CreateView(value)
    }
}
