use super::Error;

#[derive(Debug)]
pub(super) struct UnsupportedDialect {
    name: Box<str>,
}

impl std::error::Error for UnsupportedDialect {}

impl core::fmt::Display for UnsupportedDialect {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unsupported database engine `{}`", self.name)
    }
}

impl Error {
    /// Creates an error for an engine identifier no dialect is registered for.
    pub fn unsupported_dialect(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedDialect(UnsupportedDialect {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported dialect error.
    pub fn is_unsupported_dialect(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedDialect(_))
    }
}
