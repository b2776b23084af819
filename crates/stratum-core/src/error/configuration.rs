use super::Error;

/// Error when a type hierarchy or database handle is configured inconsistently.
///
/// This occurs when:
/// - A type declares more than one parent or a parent that does not exist
/// - A subtype tries to change the inheritance mode of its hierarchy
/// - A type inherits from a standalone (non-inheriting) type
/// - Discriminator values or table names collide
/// - A subtype declares a key it cannot own
///
/// These errors are raised while the schema is being registered, before any
/// statement reaches the database.
#[derive(Debug)]
pub(super) struct ConfigurationError {
    message: Box<str>,
}

impl std::error::Error for ConfigurationError {}

impl core::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Configuration(ConfigurationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Configuration(_))
    }
}
