use super::Error;

/// An error created from a format string, without a dedicated kind.
#[derive(Debug)]
pub(super) struct AdhocError {
    message: Box<str>,
}

impl std::error::Error for AdhocError {}

impl core::fmt::Display for AdhocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

pub(super) fn adhoc(message: impl Into<Box<str>>) -> super::ErrorKind {
    super::ErrorKind::Adhoc(AdhocError {
        message: message.into(),
    })
}

impl Error {
    /// Creates an ad-hoc error from format arguments. Used by the `err!` and `bail!` macros.
    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(adhoc(args.to_string()))
    }
}
