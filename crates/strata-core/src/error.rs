mod adhoc;
mod invalid_configuration;
mod invalid_filter;
mod invalid_schema;
mod lookup;
mod unsupported_feature;

use adhoc::{adhoc, AdhocError};
use invalid_configuration::InvalidConfiguration;
use invalid_filter::InvalidFilter;
use invalid_schema::InvalidSchema;
use lookup::LookupError;
use std::sync::Arc;
use unsupported_feature::UnsupportedFeature;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while mapping, composing or running a query.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Wraps this error in `consequent`, which is shown first when the
    /// error is displayed.
    ///
    /// `lookup failed: ...` with the context `resolving lookup `posts``
    /// reads `resolving lookup `posts`: lookup failed: ...`.
    pub fn context(self, consequent: impl IntoError) -> Error {
        let kind = match consequent.into_error().inner.map(Arc::try_unwrap) {
            Some(Ok(ErrorInner { kind, cause: None })) => kind,
            // A consequent with its own chain, or one shared with other
            // clones, is kept as its rendered message.
            Some(Ok(inner)) => adhoc(Error::from(inner).to_string()),
            Some(Err(shared)) => adhoc(Error { inner: Some(shared) }.to_string()),
            None => ErrorKind::Unknown,
        };

        Error::from(ErrorInner {
            kind,
            cause: Some(self),
        })
    }

    /// This error followed by its causes, outermost first.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| {
            err.inner.as_ref().and_then(|inner| inner.cause.as_ref())
        })
    }

    /// True when this error or any of its causes matches `pred`.
    fn any_kind(&self, pred: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| pred(err.kind()))
    }

    fn kind(&self) -> &ErrorKind {
        match &self.inner {
            Some(inner) => &inner.kind,
            None => &ErrorKind::Unknown,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    InvalidConfiguration(InvalidConfiguration),
    InvalidFilter(InvalidFilter),
    InvalidSchema(InvalidSchema),
    Lookup(LookupError),
    UnsupportedFeature(UnsupportedFeature),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            InvalidConfiguration(err) => core::fmt::Display::fmt(err, f),
            InvalidFilter(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            Lookup(err) => core::fmt::Display::fmt(err, f),
            UnsupportedFeature(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown strata error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::from(ErrorInner { kind, cause: None })
    }
}

impl From<ErrorInner> for Error {
    fn from(inner: ErrorInner) -> Error {
        Error {
            inner: Some(Arc::new(inner)),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(anyhow::Error::from(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
