// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Test helpers for asserting on invalidation events.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Error, ErrorKind, InvalidationListener};

/// A listener that records every message and error kind it receives.
///
/// Clones share the same record, so keep one clone for assertions and register the
/// other with the invalidator.
///
/// # Examples
///
/// ```
/// use keysweep::{Invalidator, testing::RecordingListener};
/// use keysweep_store::testing::MockStore;
/// # futures::executor::block_on(async {
///
/// let events = RecordingListener::new();
/// let invalidator = Invalidator::builder(MockStore::with_keys(["ns:foo"]))
///     .prefix("ns")
///     .listener(events.clone())
///     .build();
///
/// invalidator.delete("foo").await?;
/// assert_eq!(events.messages(), vec!["DEL ns:foo".to_string()]);
/// # Ok::<(), keysweep::Error>(())
/// # });
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecordingListener {
    messages: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<ErrorKind>>>,
}

impl RecordingListener {
    /// Creates a listener with an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded messages in arrival order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Returns the recorded messages sorted, for fan-outs where arrival order varies.
    #[must_use]
    pub fn sorted_messages(&self) -> Vec<String> {
        let mut messages = self.messages();
        messages.sort();
        messages
    }

    /// Returns the kinds of the recorded errors in arrival order.
    #[must_use]
    pub fn errors(&self) -> Vec<ErrorKind> {
        self.errors.lock().clone()
    }

    /// Clears the record.
    pub fn clear(&self) {
        self.messages.lock().clear();
        self.errors.lock().clear();
    }
}

impl InvalidationListener for RecordingListener {
    fn on_message(&self, message: &str) {
        self.messages.lock().push(message.to_owned());
    }

    fn on_error(&self, error: &Error) {
        self.errors.lock().push(error.kind());
    }
}
