// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Wildcard detection and per-key eligibility for wildcard sweeps.
//!
//! A key enumerated by a wildcard sweep is deleted only if it is *eligible*. With no
//! ignore argument every key is eligible. Otherwise two independent checks must pass:
//!
//! - **not ignored**: no qualified ignore key occurs as a substring of the candidate.
//!   This is containment, not equality, so ignoring `a1` also protects `ns:a10`.
//! - **name verified**: the requested name with its first `*` removed occurs within the
//!   ignore argument itself: within the caller's local name for a single ignore, or
//!   within at least one qualified key for an ignore list. The check looks at the ignore
//!   argument and never at the candidate. A bare `*` name always passes.
//!
//! The second check means a sweep whose ignore argument is unrelated to the requested
//! name deletes nothing. Both checks are long-standing behavior that callers depend on
//! and are kept as-is.

use crate::ignore::IgnoreSpec;

/// The wildcard marker recognized in names and patterns.
pub const WILDCARD: char = '*';

/// The name that sweeps the whole namespace.
pub const MATCH_ALL: &str = "*";

/// Returns `true` if `pattern` contains a wildcard anywhere, prefix included.
///
/// # Examples
///
/// ```
/// use keysweep::matcher::has_wildcard;
///
/// assert!(has_wildcard("ns:a*"));
/// assert!(!has_wildcard("ns:a1"));
/// ```
#[must_use]
pub fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(WILDCARD)
}

/// Decides whether an enumerated `candidate` key may be deleted.
///
/// `raw_name` is the unqualified name the caller asked to delete.
///
/// # Examples
///
/// ```
/// use keysweep::{Ignore, IgnoreSpec, Namespace, matcher::is_eligible};
///
/// let ns = Namespace::new("ns");
/// let ignore = IgnoreSpec::normalize(&ns, Ignore::from("a1"));
///
/// assert!(!is_eligible("ns:a1", &ignore, "a*"));
/// assert!(is_eligible("ns:a2", &ignore, "a*"));
/// ```
#[must_use]
pub fn is_eligible(candidate: &str, ignore: &IgnoreSpec, raw_name: &str) -> bool {
    if ignore.is_absent() {
        return true;
    }

    is_not_ignored(candidate, ignore) && (is_name_verified(ignore, raw_name) || raw_name == MATCH_ALL)
}

/// Returns `true` unless some qualified ignore key occurs within `candidate`.
#[must_use]
pub fn is_not_ignored(candidate: &str, ignore: &IgnoreSpec) -> bool {
    match ignore {
        IgnoreSpec::Absent => true,
        IgnoreSpec::Single(key) => !candidate.contains(key.qualified().as_str()),
        IgnoreSpec::Many(keys) => keys.iter().all(|key| !candidate.contains(key.qualified().as_str())),
    }
}

/// Returns `true` if the name, minus its first wildcard, occurs within the ignore argument.
#[must_use]
pub fn is_name_verified(ignore: &IgnoreSpec, raw_name: &str) -> bool {
    let stripped = raw_name.replacen(WILDCARD, "", 1);
    match ignore {
        IgnoreSpec::Absent => true,
        IgnoreSpec::Single(key) => key.local().contains(stripped.as_str()),
        IgnoreSpec::Many(keys) => keys.iter().any(|key| key.qualified().as_str().contains(stripped.as_str())),
    }
}
