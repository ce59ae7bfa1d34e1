// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Matches `key` against a glob-style `pattern`.
///
/// `*` matches any run of characters (including none) and `?` matches exactly one
/// character. Every other character matches itself. This is the subset of store-side
/// glob syntax the invalidation pipeline relies on; bracket classes are not supported.
///
/// # Examples
///
/// ```
/// use keysweep_store::glob_match;
///
/// assert!(glob_match("ns:a*", "ns:a1"));
/// assert!(glob_match("ns:*:meta", "ns:users:meta"));
/// assert!(!glob_match("ns:a*", "ns:b1"));
/// ```
#[must_use]
pub fn glob_match(pattern: &str, key: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let key: Vec<char> = key.chars().collect();

    let (mut p, mut k) = (0, 0);
    // Position of the last `*` seen and the key position it was tried against.
    let mut backtrack: Option<(usize, usize)> = None;

    while k < key.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, k));
                p += 1;
            }
            Some('?') => {
                p += 1;
                k += 1;
            }
            Some(c) if *c == key[k] => {
                p += 1;
                k += 1;
            }
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    k = tried + 1;
                    backtrack = Some((star, tried + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}
