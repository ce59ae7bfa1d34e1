// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for store operations.

/// An error from a store operation.
///
/// This is an opaque error type that can wrap any underlying error from a store
/// client. Use [`std::error::Error::source()`] to access the underlying cause.
///
/// # Example
///
/// ```
/// use keysweep_store::Error;
///
/// let error = Error::from_message("connection reset");
/// ```
#[ohno::error]
#[display("store operation failed")]
pub struct Error {}

impl Error {
    /// Creates a new error from any type that can be converted to an error.
    ///
    /// Store implementations living in other crates use this to report client failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use keysweep_store::Error;
    ///
    /// let io = std::io::Error::other("broken pipe");
    /// let error = Error::from_message(io);
    /// ```
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for store operations.
pub type Result<T> = std::result::Result<T, Error>;
