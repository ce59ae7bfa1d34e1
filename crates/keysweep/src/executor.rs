// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Deletion requests and their execution against a [`KeyStore`].
//!
//! A literal request issues exactly one deletion. A wildcard request enumerates the
//! matching keys, filters them through [`is_eligible`], and deletes the survivors
//! concurrently within the calling future. Nothing is spawned.

use std::num::NonZeroUsize;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use keysweep_store::KeyStore;

use crate::events::EventReporter;
use crate::ignore::{Ignore, IgnoreSpec};
use crate::matcher::{has_wildcard, is_eligible};
use crate::namespace::{CacheKey, Namespace};
use crate::telemetry::ext::TelemetryExt;
use crate::telemetry::{Activity, InvalidationTelemetry, Operation};
use crate::{Error, Result};

/// How many deletions a wildcard sweep keeps in flight at once.
///
/// The result of a sweep is the same under every setting; only the load placed on
/// the store differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Concurrency {
    /// Every eligible key is deleted at once.
    #[default]
    Unbounded,
    /// At most this many deletions are in flight.
    Limited(NonZeroUsize),
}

impl Concurrency {
    /// Limits a sweep to `limit` deletions in flight. A limit of zero means unbounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use keysweep::Concurrency;
    ///
    /// assert_eq!(Concurrency::limited(4).limit(), Some(4));
    /// assert_eq!(Concurrency::limited(0), Concurrency::Unbounded);
    /// ```
    #[must_use]
    pub fn limited(limit: usize) -> Self {
        NonZeroUsize::new(limit).map_or(Self::Unbounded, Self::Limited)
    }

    /// Returns the in-flight limit, or `None` when unbounded.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Limited(limit) => Some(limit.get()),
        }
    }
}

/// A single resolved deletion request.
///
/// # Examples
///
/// ```
/// use keysweep::{DeletionRequest, Ignore, Namespace};
///
/// let request = DeletionRequest::new(&Namespace::new("ns"), "a*", Ignore::from("a1"));
///
/// assert_eq!(request.pattern().as_str(), "ns:a*");
/// assert!(request.is_wildcard());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletionRequest {
    name: String,
    pattern: CacheKey,
    ignore: IgnoreSpec,
}

impl DeletionRequest {
    /// Resolves `name` and `ignore` under `namespace`.
    #[must_use]
    pub fn new(namespace: &Namespace, name: impl Into<String>, ignore: impl Into<Ignore>) -> Self {
        let name = name.into();
        Self {
            pattern: namespace.qualify(&name),
            ignore: IgnoreSpec::normalize(namespace, ignore.into()),
            name,
        }
    }

    /// Returns the name as the caller supplied it.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the qualified key or pattern.
    #[must_use]
    pub fn pattern(&self) -> &CacheKey {
        &self.pattern
    }

    /// Returns the normalized ignore specification.
    #[must_use]
    pub fn ignore(&self) -> &IgnoreSpec {
        &self.ignore
    }

    /// Returns `true` if the qualified pattern contains a wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        has_wildcard(self.pattern.as_str())
    }
}

/// Runs deletion requests against a store on behalf of an invalidator.
#[derive(Debug)]
pub(crate) struct DeletionExecutor<'a, S> {
    pub store: &'a S,
    pub namespace: &'a Namespace,
    pub concurrency: Concurrency,
    pub reporter: &'a EventReporter,
    pub telemetry: &'a Option<InvalidationTelemetry>,
}

impl<S: KeyStore> DeletionExecutor<'_, S> {
    /// Executes `request`, returning the number of keys removed or the first error.
    pub async fn execute(&self, request: &DeletionRequest) -> Result<u64> {
        let deleted = if request.is_wildcard() {
            self.sweep(request).await?
        } else {
            self.delete_literal(request.pattern().as_str()).await?
        };

        self.telemetry.record_deleted(self.namespace.prefix(), deleted);
        Ok(deleted)
    }

    async fn delete_literal(&self, key: &str) -> Result<u64> {
        match self.store.delete_key(key).await {
            Ok(count) => {
                let activity = if count > 0 { Activity::Deleted } else { Activity::Absent };
                self.record(Operation::Delete, activity, key);

                // The notification reports the attempt, so it fires even when nothing was removed.
                self.reporter.notify(key);
                Ok(count)
            }
            Err(e) => {
                self.record(Operation::Delete, Activity::Error, key);
                Err(e.into())
            }
        }
    }

    async fn sweep(&self, request: &DeletionRequest) -> Result<u64> {
        let pattern = request.pattern().as_str();
        let keys = match self.store.enumerate_keys(pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                self.record(Operation::Enumerate, Activity::Error, pattern);
                return Err(e.into());
            }
        };
        self.record(Operation::Enumerate, Activity::Enumerated, pattern);

        let mut eligible = keys.into_iter().filter(|key| {
            let keep = is_eligible(key, request.ignore(), request.name());
            if !keep {
                self.record(Operation::Enumerate, Activity::Skipped, key);
            }
            keep
        });

        let limit = self.concurrency.limit().unwrap_or(usize::MAX);
        let mut in_flight = FuturesUnordered::new();
        let mut deleted = 0_u64;
        let mut failure: Option<Error> = None;

        loop {
            // Once a deletion has failed no further deletions are issued.
            while failure.is_none() && in_flight.len() < limit {
                let Some(key) = eligible.next() else {
                    break;
                };
                in_flight.push(delete_one(self.store, key));
            }

            let Some((key, outcome)) = in_flight.next().await else {
                break;
            };

            match outcome {
                Ok(_) => {
                    self.record(Operation::Delete, Activity::Deleted, &key);
                    self.reporter.notify(&key);
                    deleted += 1;
                }
                Err(e) => {
                    self.record(Operation::Delete, Activity::Error, &key);
                    failure.get_or_insert_with(|| e.into());
                }
            }
        }

        failure.map_or(Ok(deleted), Err)
    }

    fn record(&self, operation: Operation, activity: Activity, key: &str) {
        self.telemetry.record(self.namespace.prefix(), operation, activity, key);
    }
}

async fn delete_one<S: KeyStore>(store: &S, key: String) -> (String, keysweep_store::Result<u64>) {
    let outcome = store.delete_key(&key).await;
    (key, outcome)
}
