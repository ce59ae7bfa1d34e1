// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Namespaced, wildcard-aware cache invalidation.
//!
//! This crate deletes cached entries from a key-value store by logical name. Names are
//! qualified under a namespace prefix, may contain a `*` wildcard, and can be paired with
//! an ignore list protecting some keys from a wildcard sweep.
//!
//! - Literal names issue exactly one deletion
//! - Wildcard names enumerate matching keys and delete the eligible ones concurrently
//! - Every deletion is announced to registered [`InvalidationListener`]s as `DEL <key>`
//! - The first store failure aborts the sweep and is returned to the caller
//!
//! # Examples
//!
//! ```
//! use keysweep::Invalidator;
//! use keysweep_store::testing::MockStore;
//! # futures::executor::block_on(async {
//!
//! let store = MockStore::with_keys(["ns:a1", "ns:a2", "ns:b1"]);
//! let invalidator = Invalidator::builder(store.clone()).prefix("ns:").build();
//!
//! let deleted = invalidator.delete_ignoring("a*", "a1").await?;
//! assert_eq!(deleted, 1);
//! assert_eq!(store.keys(), vec!["ns:a1".to_string(), "ns:b1".to_string()]);
//! # Ok::<(), keysweep::Error>(())
//! # });
//! ```
//!
//! # Ignore Semantics
//!
//! Ignore keys protect candidates by substring containment rather than equality, and a
//! wildcard sweep with an ignore list only proceeds when the wildcard name (minus its `*`)
//! occurs in the ignore list itself. See [`matcher`] for the exact rules.

pub mod builder;
pub mod error;
pub mod events;
pub mod executor;
pub mod ignore;
pub mod invalidator;
pub mod matcher;
pub mod namespace;
mod telemetry;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

#[doc(inline)]
pub use builder::InvalidatorBuilder;
#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use events::{EventReporter, InvalidationListener};
#[doc(inline)]
pub use executor::{Concurrency, DeletionRequest};
#[doc(inline)]
pub use ignore::{Ignore, IgnoreKey, IgnoreSpec};
#[doc(inline)]
pub use invalidator::Invalidator;
#[doc(inline)]
pub use keysweep_store::KeyStore;
#[doc(inline)]
pub use namespace::{CacheKey, Namespace};
#[cfg(any(feature = "logs", feature = "metrics", test))]
#[doc(inline)]
pub use telemetry::InvalidationTelemetry;
