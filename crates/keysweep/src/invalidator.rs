// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The invalidation facade.

use keysweep_store::KeyStore;

use crate::builder::InvalidatorBuilder;
use crate::events::EventReporter;
use crate::executor::{Concurrency, DeletionExecutor, DeletionRequest};
use crate::ignore::Ignore;
use crate::namespace::Namespace;
use crate::telemetry::ext::TelemetryExt;
use crate::telemetry::{Activity, InvalidationTelemetry, Operation};
use crate::{Error, Result};

/// Deletes cache entries by name or wildcard pattern within a namespace.
///
/// Every call is independent: the invalidator holds no per-request state, so one
/// instance can serve any number of concurrent requests.
///
/// # Examples
///
/// ```
/// use keysweep::Invalidator;
/// use keysweep_store::testing::MockStore;
///
/// # futures::executor::block_on(async {
/// let store = MockStore::with_keys(["users:1", "users:2", "users:admin"]);
/// let invalidator = Invalidator::builder(store.clone()).prefix("users").build();
///
/// // Sweep everything except the admin entry.
/// let deleted = invalidator.delete_ignoring("*", "admin").await?;
///
/// assert_eq!(deleted, 2);
/// assert_eq!(store.keys(), vec!["users:admin".to_string()]);
/// # Ok::<(), keysweep::Error>(())
/// # });
/// ```
#[derive(Debug)]
pub struct Invalidator<S> {
    store: S,
    namespace: Namespace,
    concurrency: Concurrency,
    reporter: EventReporter,
    telemetry: Option<InvalidationTelemetry>,
}

impl<S> Invalidator<S> {
    /// Creates a builder over `store`.
    #[must_use]
    pub fn builder(store: S) -> InvalidatorBuilder<S> {
        InvalidatorBuilder::new(store)
    }

    pub(crate) fn new(
        store: S,
        namespace: Namespace,
        concurrency: Concurrency,
        reporter: EventReporter,
        telemetry: Option<InvalidationTelemetry>,
    ) -> Self {
        Self {
            store,
            namespace,
            concurrency,
            reporter,
            telemetry,
        }
    }

    /// Returns the namespace every name is qualified under.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the fan-out concurrency of wildcard sweeps.
    #[must_use]
    pub fn concurrency(&self) -> Concurrency {
        self.concurrency
    }
}

impl<S: KeyStore> Invalidator<S> {
    /// Deletes the entry `name`, or every entry matching it if it contains `*`.
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`ErrorKind::Store`](crate::ErrorKind::Store) if the store
    /// fails to enumerate or delete. Deletions that already completed are not undone.
    pub async fn delete(&self, name: &str) -> Result<u64> {
        self.delete_ignoring(name, Ignore::Absent).await
    }

    /// Like [`delete`](Self::delete), but a wildcard sweep leaves the entries named by
    /// `ignore` in place.
    ///
    /// Ignoring is substring based: an ignored name protects every key that contains
    /// its qualified form. See [`matcher`](crate::matcher) for the full rules. A literal
    /// delete disregards `ignore`.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`ErrorKind::Store`](crate::ErrorKind::Store) if the store
    /// fails to enumerate or delete.
    pub async fn delete_ignoring(&self, name: &str, ignore: impl Into<Ignore>) -> Result<u64> {
        let request = DeletionRequest::new(&self.namespace, name, ignore);
        DeletionExecutor {
            store: &self.store,
            namespace: &self.namespace,
            concurrency: self.concurrency,
            reporter: &self.reporter,
            telemetry: &self.telemetry,
        }
        .execute(&request)
        .await
    }

    /// Deletes `name` and hands the outcome to `callback`.
    ///
    /// Arguments are validated before the store is touched:
    ///
    /// - Without a `name`, a [`MissingArgument("name")`](crate::ErrorKind::MissingArgument)
    ///   error is delivered to the listeners and, if present, to `callback`.
    /// - Without a `callback`, a `MissingArgument("callback")` error is delivered to
    ///   the listeners and nothing else happens.
    ///
    /// Otherwise `callback` runs exactly once, with the count or the first error.
    ///
    /// # Examples
    ///
    /// ```
    /// use keysweep::{Invalidator, Result};
    /// use keysweep_store::testing::MockStore;
    ///
    /// # futures::executor::block_on(async {
    /// let invalidator = Invalidator::builder(MockStore::with_keys(["cache:a1"])).build();
    ///
    /// invalidator
    ///     .delete_with(Some("a*"), Some(|result: Result<u64>| assert_eq!(result.unwrap(), 1)), None::<&str>)
    ///     .await;
    ///
    /// // A missing callback needs its type spelled out.
    /// invalidator.delete_with(Some("a*"), None::<fn(Result<u64>)>, None::<&str>).await;
    /// # });
    /// ```
    pub async fn delete_with<F>(&self, name: Option<&str>, callback: Option<F>, ignore: impl Into<Ignore>)
    where
        F: FnOnce(Result<u64>),
    {
        let Some(name) = name else {
            let error = Error::missing_argument("name");
            self.reject(&error);
            if let Some(callback) = callback {
                callback(Err(error));
            }
            return;
        };

        let Some(callback) = callback else {
            self.reject(&Error::missing_argument("callback"));
            return;
        };

        callback(self.delete_ignoring(name, ignore).await);
    }

    fn reject(&self, error: &Error) {
        self.telemetry
            .record(self.namespace.prefix(), Operation::Validate, Activity::Rejected, "");
        self.reporter.report_error(error);
    }
}
