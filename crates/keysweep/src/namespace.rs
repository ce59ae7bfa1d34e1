// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Namespace prefixes and fully-qualified store keys.

use std::fmt;

/// Separator placed between a namespace prefix and a local name.
pub const SEPARATOR: char = ':';

/// Prefix used when the builder is not given one.
pub const DEFAULT_PREFIX: &str = "cache";

/// A fully-qualified store key of the form `<namespace>:<local name>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the key and returns the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CacheKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CacheKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The namespace every local name is qualified under.
///
/// A single trailing [`SEPARATOR`] is stripped on construction, so `"ns"` and `"ns:"`
/// describe the same namespace.
///
/// # Examples
///
/// ```
/// use keysweep::Namespace;
///
/// let ns = Namespace::new("users:");
/// assert_eq!(ns.prefix(), "users");
/// assert_eq!(ns.qualify("42"), "users:42");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    /// Creates a namespace from a configured prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if prefix.ends_with(SEPARATOR) {
            prefix.pop();
        }
        Self { prefix }
    }

    /// Returns the prefix without its trailing separator.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Composes the fully-qualified store key for `local`.
    #[must_use]
    pub fn qualify(&self, local: &str) -> CacheKey {
        let mut key = String::with_capacity(self.prefix.len() + 1 + local.len());
        key.push_str(&self.prefix);
        key.push(SEPARATOR);
        key.push_str(local);
        CacheKey(key)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

/// Qualifies `local` under `prefix` in one step.
///
/// Equivalent to `Namespace::new(prefix).qualify(local)`.
#[must_use]
pub fn qualify(prefix: &str, local: &str) -> CacheKey {
    Namespace::new(prefix).qualify(local)
}
