// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring an [`Invalidator`].

use std::sync::Arc;

use crate::events::{EventReporter, InvalidationListener};
use crate::executor::Concurrency;
use crate::invalidator::Invalidator;
use crate::namespace::{DEFAULT_PREFIX, Namespace};
use crate::telemetry::InvalidationTelemetry;

/// Builder for constructing an [`Invalidator`].
///
/// Created by calling [`Invalidator::builder`]. Every setting has a default, so
/// `Invalidator::builder(store).build()` is a working invalidator over the `cache`
/// namespace.
///
/// # Examples
///
/// ```
/// use keysweep::{Concurrency, InvalidationListener, Invalidator};
/// use keysweep_store::testing::MockStore;
///
/// struct PrintDeletions;
///
/// impl InvalidationListener for PrintDeletions {
///     fn on_message(&self, message: &str) {
///         println!("{message}");
///     }
/// }
///
/// let invalidator = Invalidator::builder(MockStore::new())
///     .prefix("sessions:")
///     .concurrency(Concurrency::limited(16))
///     .listener(PrintDeletions)
///     .build();
///
/// assert_eq!(invalidator.namespace().prefix(), "sessions");
/// ```
#[derive(Debug)]
pub struct InvalidatorBuilder<S> {
    store: S,
    prefix: String,
    concurrency: Concurrency,
    reporter: EventReporter,
    telemetry: Option<InvalidationTelemetry>,
}

impl<S> InvalidatorBuilder<S> {
    pub(crate) fn new(store: S) -> Self {
        Self {
            store,
            prefix: DEFAULT_PREFIX.to_owned(),
            concurrency: Concurrency::default(),
            reporter: EventReporter::new(),
            telemetry: None,
        }
    }

    /// Sets the namespace prefix. One trailing `:` is stripped.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets how many deletions a wildcard sweep keeps in flight.
    #[must_use]
    pub fn concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Registers a listener for deletion messages and error events.
    ///
    /// May be called repeatedly; every listener receives every event.
    #[must_use]
    pub fn listener(self, listener: impl InvalidationListener + 'static) -> Self {
        self.shared_listener(Arc::new(listener))
    }

    /// Registers a listener that is shared with other owners.
    #[must_use]
    pub fn shared_listener(mut self, listener: Arc<dyn InvalidationListener>) -> Self {
        self.reporter.add(listener);
        self
    }

    /// Enables telemetry for invalidation activity.
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    #[must_use]
    pub fn telemetry(mut self, telemetry: InvalidationTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Builds the invalidator.
    #[must_use]
    pub fn build(self) -> Invalidator<S> {
        Invalidator::new(
            self.store,
            Namespace::new(self.prefix),
            self.concurrency,
            self.reporter,
            self.telemetry,
        )
    }
}
