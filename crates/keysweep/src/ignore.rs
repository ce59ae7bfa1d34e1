// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Caller-supplied ignore arguments and their normalized form.
//!
//! [`Ignore`] is what a caller hands in: nothing, one local name, or a list of local
//! names. [`IgnoreSpec::normalize`] qualifies every name under the invalidator's
//! namespace once per request so the matcher can branch on the variant alone.

use crate::namespace::{CacheKey, Namespace};

/// An ignore argument as supplied by the caller.
///
/// Conversions exist from the common string and list types, so most callers never
/// name this type:
///
/// ```
/// use keysweep::Ignore;
///
/// assert_eq!(Ignore::from("a1"), Ignore::One("a1".to_string()));
/// assert_eq!(Ignore::from(["a1", "a2"]), Ignore::Many(vec!["a1".to_string(), "a2".to_string()]));
/// assert_eq!(Ignore::from(None::<&str>), Ignore::Absent);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Ignore {
    /// Nothing is ignored.
    #[default]
    Absent,
    /// A single local name.
    One(String),
    /// A list of local names, in caller order.
    Many(Vec<String>),
}

impl From<&str> for Ignore {
    fn from(name: &str) -> Self {
        Self::One(name.to_owned())
    }
}

impl From<String> for Ignore {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<&String> for Ignore {
    fn from(name: &String) -> Self {
        Self::One(name.clone())
    }
}

impl From<Vec<String>> for Ignore {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<Vec<&str>> for Ignore {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Ignore {
    fn from(names: &[&str]) -> Self {
        Self::Many(names.iter().map(|name| (*name).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Ignore {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|name| (*name).to_owned()).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Ignore {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Loosely-typed ignore arguments, as received from JSON request bodies.
///
/// Strings become [`Ignore::One`] and arrays become [`Ignore::Many`]; any other value is
/// treated as [`Ignore::Absent`] rather than rejected. Array elements that are not
/// strings are kept in their JSON text form.
#[cfg(any(feature = "json", test))]
impl From<&serde_json::Value> for Ignore {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(name) => Self::One(name.clone()),
            serde_json::Value::Array(items) => Self::Many(
                items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(name) => name.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            _ => Self::Absent,
        }
    }
}

#[cfg(any(feature = "json", test))]
impl From<serde_json::Value> for Ignore {
    fn from(value: serde_json::Value) -> Self {
        Self::from(&value)
    }
}

/// One ignored name, kept both as supplied and qualified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoreKey {
    local: String,
    qualified: CacheKey,
}

impl IgnoreKey {
    /// Qualifies `local` under `namespace`.
    #[must_use]
    pub fn new(namespace: &Namespace, local: impl Into<String>) -> Self {
        let local = local.into();
        let qualified = namespace.qualify(&local);
        Self { local, qualified }
    }

    /// Returns the name as the caller supplied it.
    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }

    /// Returns the namespace-qualified key.
    #[must_use]
    pub fn qualified(&self) -> &CacheKey {
        &self.qualified
    }
}

/// The normalized ignore specification of a single deletion request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum IgnoreSpec {
    /// No ignore argument; every enumerated key is eligible.
    #[default]
    Absent,
    /// A single ignored key.
    Single(IgnoreKey),
    /// Several ignored keys, in caller order. May be empty.
    Many(Vec<IgnoreKey>),
}

impl IgnoreSpec {
    /// Qualifies the caller's ignore argument under `namespace`.
    ///
    /// An empty single name carries no restriction and normalizes to [`IgnoreSpec::Absent`].
    /// An empty list stays an (empty) [`IgnoreSpec::Many`].
    ///
    /// # Examples
    ///
    /// ```
    /// use keysweep::{Ignore, IgnoreSpec, Namespace};
    ///
    /// let ns = Namespace::new("ns:");
    /// let spec = IgnoreSpec::normalize(&ns, Ignore::from(["a1", "a2"]));
    ///
    /// let keys: Vec<_> = spec.keys().map(|k| k.qualified().to_string()).collect();
    /// assert_eq!(keys, ["ns:a1", "ns:a2"]);
    /// ```
    #[must_use]
    pub fn normalize(namespace: &Namespace, raw: Ignore) -> Self {
        match raw {
            Ignore::Absent => Self::Absent,
            Ignore::One(name) if name.is_empty() => Self::Absent,
            Ignore::One(name) => Self::Single(IgnoreKey::new(namespace, name)),
            Ignore::Many(names) => Self::Many(names.into_iter().map(|name| IgnoreKey::new(namespace, name)).collect()),
        }
    }

    /// Returns `true` if no ignore argument was supplied.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Iterates over the ignored keys in caller order.
    pub fn keys(&self) -> impl Iterator<Item = &IgnoreKey> {
        match self {
            Self::Absent => <&[IgnoreKey]>::default().iter(),
            Self::Single(key) => std::slice::from_ref(key).iter(),
            Self::Many(keys) => keys.iter(),
        }
    }
}
