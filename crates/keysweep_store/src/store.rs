// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The collaborator trait for key-value stores.
//!
//! [`KeyStore`] is the whole surface the invalidation pipeline needs from a store:
//! pattern enumeration and single-key deletion.

use std::sync::Arc;

use crate::Error;

/// Trait for key-value stores that cache entries can be invalidated in.
///
/// Both methods are independent, non-transactional calls. Implementations are
/// shared between concurrent invalidation requests, so they must be `Send + Sync`
/// and must not rely on calls being serialized.
pub trait KeyStore: Send + Sync {
    /// Returns every key currently matching the glob-style `pattern`.
    fn enumerate_keys(&self, pattern: &str) -> impl Future<Output = Result<Vec<String>, Error>> + Send;

    /// Deletes a single key, returning how many entries were removed.
    ///
    /// Deleting a key that does not exist is not an error and reports `0`.
    fn delete_key(&self, key: &str) -> impl Future<Output = Result<u64, Error>> + Send;
}

impl<S: KeyStore> KeyStore for Arc<S> {
    fn enumerate_keys(&self, pattern: &str) -> impl Future<Output = Result<Vec<String>, Error>> + Send {
        self.as_ref().enumerate_keys(pattern)
    }

    fn delete_key(&self, key: &str) -> impl Future<Output = Result<u64, Error>> + Send {
        self.as_ref().delete_key(key)
    }
}

impl<S: KeyStore> KeyStore for &S {
    fn enumerate_keys(&self, pattern: &str) -> impl Future<Output = Result<Vec<String>, Error>> + Send {
        (**self).enumerate_keys(pattern)
    }

    fn delete_key(&self, key: &str) -> impl Future<Output = Result<u64, Error>> + Send {
        (**self).delete_key(key)
    }
}
