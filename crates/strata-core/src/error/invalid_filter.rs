use super::Error;

/// Error when a filter key does not follow the `field (operator)` grammar.
#[derive(Debug)]
pub(super) struct InvalidFilter {
    key: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidFilter {}

impl core::fmt::Display for InvalidFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid filter key `{}`: {}", self.key, self.message)
    }
}

impl Error {
    /// Creates an invalid filter error for the raw `key` that failed to parse.
    pub fn invalid_filter(key: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidFilter(InvalidFilter {
            key: key.into().into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid filter error.
    pub fn is_invalid_filter(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidFilter(_)))
    }
}
