// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Deletion notifications and error events.

use std::{fmt, sync::Arc};

use crate::Error;

/// Observer of invalidation activity.
///
/// Listeners are invoked synchronously on the task running the request, once per
/// deleted key and once per rejected request. Both methods default to doing nothing,
/// so implement only what you need.
///
/// # Examples
///
/// ```
/// use keysweep::InvalidationListener;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Default)]
/// struct DeletionCounter(AtomicUsize);
///
/// impl InvalidationListener for DeletionCounter {
///     fn on_message(&self, _message: &str) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait InvalidationListener: Send + Sync {
    /// Receives an informational message, `DEL <key>`, for each deleted key.
    fn on_message(&self, message: &str) {
        let _ = message;
    }

    /// Receives an error that could not be reported to a callback.
    fn on_error(&self, error: &Error) {
        let _ = error;
    }
}

impl<L: InvalidationListener + ?Sized> InvalidationListener for Arc<L> {
    fn on_message(&self, message: &str) {
        (**self).on_message(message);
    }

    fn on_error(&self, error: &Error) {
        (**self).on_error(error);
    }
}

/// Fans notifications out to every registered listener.
///
/// Delivery is fire-and-forget: listeners cannot fail or acknowledge.
#[derive(Clone, Default)]
pub struct EventReporter {
    listeners: Vec<Arc<dyn InvalidationListener>>,
}

impl EventReporter {
    /// Creates a reporter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    pub fn add(&mut self, listener: Arc<dyn InvalidationListener>) {
        self.listeners.push(listener);
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Announces the deletion of `key` as `DEL <key>`.
    pub fn notify(&self, key: &str) {
        if self.listeners.is_empty() {
            return;
        }

        let message = format!("DEL {key}");
        for listener in &self.listeners {
            listener.on_message(&message);
        }
    }

    /// Delivers `error` to every listener.
    pub fn report_error(&self, error: &Error) {
        for listener in &self.listeners {
            listener.on_error(error);
        }
    }
}

impl fmt::Debug for EventReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventReporter").field("listeners", &self.listeners.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, testing::RecordingListener};

    #[test]
    fn notify_formats_deletion_message() {
        let listener = RecordingListener::new();
        let mut reporter = EventReporter::new();
        reporter.add(Arc::new(listener.clone()));

        reporter.notify("ns:foo");

        assert_eq!(listener.messages(), vec!["DEL ns:foo".to_string()]);
        assert!(listener.errors().is_empty());
    }

    #[test]
    fn every_listener_is_notified() {
        let first = RecordingListener::new();
        let second = RecordingListener::new();
        let mut reporter = EventReporter::new();
        reporter.add(Arc::new(first.clone()));
        reporter.add(Arc::new(second.clone()));

        reporter.notify("ns:a1");
        reporter.report_error(&Error::missing_argument("name"));

        for listener in [first, second] {
            assert_eq!(listener.messages(), vec!["DEL ns:a1".to_string()]);
            assert_eq!(listener.errors(), vec![ErrorKind::MissingArgument("name")]);
        }
        assert_eq!(reporter.len(), 2);
    }

    #[test]
    fn reporter_without_listeners_is_a_no_op() {
        let reporter = EventReporter::new();
        assert!(reporter.is_empty());
        reporter.notify("ns:foo");
        reporter.report_error(&Error::missing_argument("callback"));
    }

    #[test]
    fn default_listener_methods_do_nothing() {
        struct Silent;
        impl InvalidationListener for Silent {}

        let mut reporter = EventReporter::new();
        reporter.add(Arc::new(Silent));
        reporter.notify("ns:foo");
        reporter.report_error(&Error::missing_argument("name"));
    }

    #[test]
    fn debug_shows_listener_count() {
        let mut reporter = EventReporter::new();
        reporter.add(Arc::new(RecordingListener::new()));
        assert_eq!(format!("{reporter:?}"), "EventReporter { listeners: 1 }");
    }
}
