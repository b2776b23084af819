use super::Statement;

#[derive(Debug, Clone)]
pub struct DropView {
    /// Name of the view
    pub name: String,
}

impl Statement {
    /// Drops a view; succeeds when the view does not exist.
    pub fn drop_view(name: impl Into<String>) -> Self {
        DropView { name: name.into() }.into()
    }
}

impl From<DropView> for Statement {
    fn from(value: DropView) -> Self {
        Self::DropView(value)
    }
}
