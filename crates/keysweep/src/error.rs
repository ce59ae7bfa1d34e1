// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for invalidation requests.

use std::fmt;

/// The category of an invalidation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required argument was not supplied. Holds the argument's name.
    ///
    /// Raised before the store is touched.
    MissingArgument(&'static str),
    /// The store failed to enumerate or delete keys.
    ///
    /// The store's error is available through [`std::error::Error::source()`].
    Store,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument(argument) => write!(f, "MissingArgument: {argument}"),
            Self::Store => f.write_str("store operation failed"),
        }
    }
}

/// An error from an invalidation request.
///
/// # Examples
///
/// ```
/// use keysweep::{Error, ErrorKind};
///
/// let error = Error::from(keysweep_store::Error::from_message("connection reset"));
/// assert_eq!(error.kind(), ErrorKind::Store);
/// ```
#[ohno::error]
#[derive(Clone)]
#[display("{kind}")]
#[from(keysweep_store::Error(kind: ErrorKind::Store))]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn missing_argument(argument: &'static str) -> Self {
        Self::new(ErrorKind::MissingArgument(argument))
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns `true` if the request was rejected before reaching the store.
    #[must_use]
    pub fn is_missing_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingArgument(_))
    }
}

/// A specialized [`Result`] type for invalidation requests.
pub type Result<T> = std::result::Result<T, Error>;
