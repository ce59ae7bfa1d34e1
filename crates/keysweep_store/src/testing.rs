// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock store implementation for testing.
//!
//! This module provides `MockStore`, an in-memory key store that records every
//! call, supports failure injection, and tracks how many deletions were in flight
//! at once so fan-out limits can be asserted.

use std::{
    collections::BTreeSet,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    task::{Context, Poll},
};

use parking_lot::Mutex;

use crate::{Error, KeyStore, glob_match};

/// Recorded store call with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// Keys matching the given pattern were enumerated.
    EnumerateKeys(String),
    /// The given key was deleted.
    DeleteKey(String),
}

type FailPredicate = Box<dyn Fn(&StoreOp) -> bool + Send + Sync>;

/// A configurable mock key store for testing.
///
/// Keys are kept in sorted order so enumeration is deterministic. Every call is
/// recorded, and a failure predicate can make selected calls return an error.
///
/// # Examples
///
/// ```
/// use keysweep_store::{KeyStore, testing::{MockStore, StoreOp}};
///
/// # futures::executor::block_on(async {
/// let store = MockStore::with_keys(["ns:a1", "ns:a2", "ns:b1"]);
///
/// let keys = store.enumerate_keys("ns:a*").await.unwrap();
/// assert_eq!(keys, vec!["ns:a1".to_string(), "ns:a2".to_string()]);
///
/// assert_eq!(store.delete_key("ns:a1").await.unwrap(), 1);
/// assert_eq!(store.delete_key("ns:a1").await.unwrap(), 0);
///
/// assert_eq!(store.operations(), vec![
///     StoreOp::EnumerateKeys("ns:a*".to_string()),
///     StoreOp::DeleteKey("ns:a1".to_string()),
///     StoreOp::DeleteKey("ns:a1".to_string()),
/// ]);
/// # });
/// ```
///
/// # Failure Injection
///
/// ```
/// use keysweep_store::{KeyStore, testing::{MockStore, StoreOp}};
///
/// # futures::executor::block_on(async {
/// let store = MockStore::with_keys(["ns:a1", "ns:a2"]);
/// store.fail_when(|op| matches!(op, StoreOp::DeleteKey(k) if k == "ns:a2"));
///
/// assert!(store.delete_key("ns:a1").await.is_ok());
/// assert!(store.delete_key("ns:a2").await.is_err());
/// # });
/// ```
pub struct MockStore {
    keys: Arc<Mutex<BTreeSet<String>>>,
    operations: Arc<Mutex<Vec<StoreOp>>>,
    fail_when: Arc<Mutex<Option<FailPredicate>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl std::fmt::Debug for MockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStore")
            .field("keys", &self.keys)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .field("max_in_flight", &self.max_in_flight.load(Ordering::Relaxed))
            .finish()
    }
}

impl Clone for MockStore {
    fn clone(&self) -> Self {
        Self {
            keys: Arc::clone(&self.keys),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
            in_flight: Arc::clone(&self.in_flight),
            max_in_flight: Arc::clone(&self.max_in_flight),
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Creates a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_keys(std::iter::empty::<String>())
    }

    /// Creates a mock store pre-populated with the given keys.
    #[must_use]
    pub fn with_keys<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            keys: Arc::new(Mutex::new(keys.into_iter().map(Into::into).collect())),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Adds a key to the store.
    pub fn insert_key(&self, key: impl Into<String>) {
        self.keys.lock().insert(key.into());
    }

    /// Returns true if the store contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.lock().contains(key)
    }

    /// Returns a sorted snapshot of every key in the store.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().iter().cloned().collect()
    }

    /// Sets a predicate that determines when calls should fail.
    ///
    /// The predicate receives the call about to be made and returns `true` if it
    /// should fail. A failed call is still recorded but leaves the keys untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use keysweep_store::testing::{MockStore, StoreOp};
    ///
    /// let store = MockStore::new();
    ///
    /// // Fail every call
    /// store.fail_when(|_| true);
    ///
    /// // Fail only enumeration
    /// store.fail_when(|op| matches!(op, StoreOp::EnumerateKeys(_)));
    /// ```
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&StoreOp) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all calls to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded calls.
    #[must_use]
    pub fn operations(&self) -> Vec<StoreOp> {
        self.operations.lock().clone()
    }

    /// Returns the keys passed to `delete_key`, in call order.
    #[must_use]
    pub fn deleted_keys(&self) -> Vec<String> {
        self.operations
            .lock()
            .iter()
            .filter_map(|op| match op {
                StoreOp::DeleteKey(key) => Some(key.clone()),
                StoreOp::EnumerateKeys(_) => None,
            })
            .collect()
    }

    /// Clears all recorded calls.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    /// Returns the highest number of `delete_key` calls that were in flight at once.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, op: StoreOp) {
        self.operations.lock().push(op);
    }

    fn should_fail(&self, op: &StoreOp) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }
}

impl KeyStore for MockStore {
    async fn enumerate_keys(&self, pattern: &str) -> Result<Vec<String>, Error> {
        let op = StoreOp::EnumerateKeys(pattern.to_owned());
        let fail = self.should_fail(&op);
        self.record(op);
        if fail {
            return Err(Error::caused_by("mock: enumerate_keys failed"));
        }

        Ok(self.keys.lock().iter().filter(|key| glob_match(pattern, key)).cloned().collect())
    }

    async fn delete_key(&self, key: &str) -> Result<u64, Error> {
        let op = StoreOp::DeleteKey(key.to_owned());
        let fail = self.should_fail(&op);
        self.record(op);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Suspend once so concurrently issued deletions overlap.
        YieldNow::default().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if fail {
            return Err(Error::caused_by("mock: delete_key failed"));
        }

        Ok(u64::from(self.keys.lock().remove(key)))
    }
}

/// Returns `Pending` exactly once, waking itself immediately.
#[derive(Debug, Default)]
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}
