// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Key-value store abstraction for cache invalidation.
//!
//! This crate defines the [`KeyStore`] trait that the `keysweep` invalidation pipeline
//! issues its calls against, along with the opaque [`Error`] type store implementations
//! report failures through.
//!
//! # Overview
//!
//! The invalidation pipeline only needs two primitives from the underlying store:
//! enumerating the keys matching a glob-style pattern, and deleting a single key.
//! Connection management, protocol framing and timeouts stay with the store client.
//!
//! # Implementing a Store
//!
//! ```
//! use keysweep_store::{Error, KeyStore};
//! use std::collections::BTreeSet;
//! use std::sync::RwLock;
//!
//! struct PrefixStore(RwLock<BTreeSet<String>>);
//!
//! impl KeyStore for PrefixStore {
//!     async fn enumerate_keys(&self, pattern: &str) -> Result<Vec<String>, Error> {
//!         let prefix = pattern.trim_end_matches('*');
//!         Ok(self.0.read().unwrap().iter().filter(|k| k.starts_with(prefix)).cloned().collect())
//!     }
//!
//!     async fn delete_key(&self, key: &str) -> Result<u64, Error> {
//!         Ok(u64::from(self.0.write().unwrap().remove(key)))
//!     }
//! }
//! ```
//!
//! # Testing
//!
//! Enable the `test-util` feature for [`testing::MockStore`], an in-memory store that
//! records every call and supports failure injection.

pub mod error;
mod glob;
mod store;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use glob::glob_match;
#[doc(inline)]
pub use store::KeyStore;
