use super::Error;
use crate::stmt::Id;

/// Error when a fetch under the `Fail` policy finds a requested id without a
/// stored record.
///
/// Carries the first missing identifier in the caller's request order.
#[derive(Debug)]
pub(super) struct IdentifierNotFoundError {
    id: Id,
}

impl std::error::Error for IdentifierNotFoundError {}

impl core::fmt::Display for IdentifierNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "identifier not found: {:?}", self.id)
    }
}

impl Error {
    /// Creates an identifier-not-found error for `id`.
    pub fn identifier_not_found(id: Id) -> Error {
        Error::from(super::ErrorKind::IdentifierNotFound(
            IdentifierNotFoundError { id },
        ))
    }

    /// Returns `true` if this error, or any error in its context chain, is an
    /// identifier-not-found error.
    pub fn is_identifier_not_found(&self) -> bool {
        self.missing_identifier().is_some()
    }

    /// Returns the missing identifier carried by this error, if any.
    pub fn missing_identifier(&self) -> Option<&Id> {
        self.find_kind(|kind| match kind {
            super::ErrorKind::IdentifierNotFound(err) => Some(&err.id),
            _ => None,
        })
    }
}
