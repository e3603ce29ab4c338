use super::Error;

/// Error when a relationship or nested lookup cannot be resolved.
///
/// Raised when no relationship, or more than one, exists between two
/// collections, and when a lookup targets a path nothing else provides.
#[derive(Debug)]
pub(super) struct LookupError {
    message: Box<str>,
}

impl std::error::Error for LookupError {}

impl core::fmt::Display for LookupError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "lookup failed: {}", self.message)
    }
}

impl Error {
    /// Creates a lookup error.
    pub fn lookup(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Lookup(LookupError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a lookup error.
    pub fn is_lookup(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::Lookup(_)))
    }
}
