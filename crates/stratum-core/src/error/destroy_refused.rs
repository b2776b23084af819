use super::Error;

/// Error when `destroy` is called on a handle that was not opted in.
#[derive(Debug)]
pub(super) struct DestroyRefused;

impl std::error::Error for DestroyRefused {}

impl core::fmt::Display for DestroyRefused {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("refusing to destroy database: not configured as destroyable")
    }
}

impl Error {
    /// Creates an error signalling that destroying the database is not allowed.
    pub fn destroy_refused() -> Error {
        Error::from(super::ErrorKind::DestroyRefused(DestroyRefused))
    }

    /// Returns `true` if this error is a refused destroy.
    pub fn is_destroy_refused(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DestroyRefused(_))
    }
}
