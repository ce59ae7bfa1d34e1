// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for the invalidation pipeline.

use std::sync::{Arc, Mutex};

use keysweep::{Concurrency, Error, ErrorKind, Ignore, InvalidationListener, Invalidator};
use keysweep_store::testing::{MockStore, StoreOp};

type TestResult = Result<(), Error>;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

#[derive(Clone, Default)]
struct Events {
    messages: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<ErrorKind>>>,
}

impl Events {
    fn messages(&self) -> Vec<String> {
        let mut messages = self.messages.lock().unwrap().clone();
        messages.sort();
        messages
    }

    fn errors(&self) -> Vec<ErrorKind> {
        self.errors.lock().unwrap().clone()
    }
}

impl InvalidationListener for Events {
    fn on_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }

    fn on_error(&self, error: &Error) {
        self.errors.lock().unwrap().push(error.kind());
    }
}

fn setup(keys: &[&str]) -> (Invalidator<MockStore>, MockStore, Events) {
    let store = MockStore::with_keys(keys.iter().copied());
    let events = Events::default();
    let invalidator = Invalidator::builder(store.clone())
        .prefix("ns")
        .listener(events.clone())
        .build();
    (invalidator, store, events)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn literal_delete_of_existing_key() -> TestResult {
    let (invalidator, store, events) = setup(&["ns:foo"]);

    block_on(async {
        assert_eq!(invalidator.delete("foo").await?, 1);
        assert_eq!(store.operations(), vec![StoreOp::DeleteKey("ns:foo".to_string())]);
        assert_eq!(events.messages(), strings(&["DEL ns:foo"]));
        Ok(())
    })
}

#[test]
fn literal_delete_of_absent_key_still_notifies() -> TestResult {
    let (invalidator, _, events) = setup(&[]);

    block_on(async {
        assert_eq!(invalidator.delete("bar").await?, 0);
        assert_eq!(events.messages(), strings(&["DEL ns:bar"]));
        Ok(())
    })
}

#[test]
fn wildcard_delete_without_ignore() -> TestResult {
    let (invalidator, store, events) = setup(&["ns:a1", "ns:a2", "ns:b1"]);

    block_on(async {
        assert_eq!(invalidator.delete("a*").await?, 2);
        assert_eq!(store.keys(), strings(&["ns:b1"]));
        assert_eq!(events.messages(), strings(&["DEL ns:a1", "DEL ns:a2"]));
        Ok(())
    })
}

#[test]
fn wildcard_delete_with_single_ignore() -> TestResult {
    let (invalidator, store, events) = setup(&["ns:a1", "ns:a2", "ns:b1"]);

    block_on(async {
        assert_eq!(invalidator.delete_ignoring("a*", "a1").await?, 1);
        assert_eq!(store.keys(), strings(&["ns:a1", "ns:b1"]));
        assert_eq!(events.messages(), strings(&["DEL ns:a2"]));
        Ok(())
    })
}

#[test]
fn wildcard_delete_with_ignore_list() -> TestResult {
    let (invalidator, store, events) = setup(&["ns:a1", "ns:a2", "ns:b1"]);

    block_on(async {
        assert_eq!(invalidator.delete_ignoring("a*", ["a1", "a2"]).await?, 0);
        assert_eq!(store.keys(), strings(&["ns:a1", "ns:a2", "ns:b1"]));
        assert!(events.messages().is_empty());
        Ok(())
    })
}

#[test]
fn missing_arguments_never_reach_the_store() {
    let (invalidator, store, events) = setup(&["ns:a1"]);
    let called = Arc::new(Mutex::new(Vec::new()));

    block_on(async {
        let record = Arc::clone(&called);
        invalidator
            .delete_with(
                None,
                Some(move |result: keysweep::Result<u64>| record.lock().unwrap().push(result.map_err(|e| e.kind()))),
                Ignore::Absent,
            )
            .await;
        invalidator
            .delete_with(Some("a*"), None::<fn(keysweep::Result<u64>)>, Ignore::Absent)
            .await;
    });

    assert_eq!(
        *called.lock().unwrap(),
        vec![Err(ErrorKind::MissingArgument("name"))]
    );
    assert_eq!(
        events.errors(),
        vec![ErrorKind::MissingArgument("name"), ErrorKind::MissingArgument("callback")]
    );
    assert!(store.operations().is_empty());
    assert_eq!(store.keys(), strings(&["ns:a1"]));
}

#[test]
fn enumeration_failure_reaches_the_caller() {
    let (invalidator, store, events) = setup(&["ns:a1"]);
    store.fail_when(|op| matches!(op, StoreOp::EnumerateKeys(_)));

    let error = block_on(invalidator.delete("a*")).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Store);
    assert!(events.messages().is_empty());
    assert_eq!(store.keys(), strings(&["ns:a1"]));
}

#[test]
fn deletion_failure_reaches_the_caller() {
    let (invalidator, store, _) = setup(&["ns:a1", "ns:a2"]);
    store.fail_when(|op| matches!(op, StoreOp::DeleteKey(key) if key == "ns:a2"));

    let error = block_on(invalidator.delete("a*")).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Store);
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn deleting_nothing_is_idempotent() -> TestResult {
    let (invalidator, _, _) = setup(&["ns:b1"]);

    block_on(async {
        assert_eq!(invalidator.delete("a*").await?, 0);
        assert_eq!(invalidator.delete("a*").await?, 0);
        Ok(())
    })
}

#[test]
fn limited_concurrency_caps_in_flight_deletions() -> TestResult {
    let keys: Vec<String> = (0..10).map(|i| format!("ns:k{i}")).collect();
    let store = MockStore::with_keys(keys);
    let invalidator = Invalidator::builder(store.clone())
        .prefix("ns")
        .concurrency(Concurrency::limited(3))
        .build();

    block_on(async {
        assert_eq!(invalidator.delete("k*").await?, 10);
        assert!(store.max_in_flight() <= 3);
        assert!(store.keys().is_empty());
        Ok(())
    })
}

#[test]
fn trailing_separator_in_prefix_is_equivalent() -> TestResult {
    let with = MockStore::with_keys(["ns:foo"]);
    let without = MockStore::with_keys(["ns:foo"]);

    block_on(async {
        Invalidator::builder(with.clone()).prefix("ns:").build().delete("foo").await?;
        Invalidator::builder(without.clone()).prefix("ns").build().delete("foo").await?;
        Ok::<(), Error>(())
    })?;

    assert_eq!(with.operations(), without.operations());
    assert_eq!(with.operations(), vec![StoreOp::DeleteKey("ns:foo".to_string())]);
    Ok(())
}

#[test]
fn match_all_with_ignore_list_spares_ignored_keys() -> TestResult {
    let (invalidator, store, _) = setup(&["ns:a1", "ns:a2", "ns:b1", "ns:c1"]);

    block_on(async {
        assert_eq!(invalidator.delete_ignoring("*", ["a1", "b1"]).await?, 2);
        assert_eq!(store.keys(), strings(&["ns:a1", "ns:b1"]));
        Ok(())
    })
}

// Ignoring is substring containment, so `a1` also protects `a10`.
#[test]
fn ignored_name_protects_longer_keys() -> TestResult {
    let (invalidator, store, _) = setup(&["ns:a1", "ns:a10", "ns:a2"]);

    block_on(async {
        assert_eq!(invalidator.delete_ignoring("a*", "a1").await?, 1);
        assert_eq!(store.keys(), strings(&["ns:a1", "ns:a10"]));
        Ok(())
    })
}

// An ignore argument unrelated to the requested name blocks the whole sweep.
#[test]
fn unrelated_ignore_deletes_nothing() -> TestResult {
    let (invalidator, store, _) = setup(&["ns:a1", "ns:a2"]);

    block_on(async {
        assert_eq!(invalidator.delete_ignoring("a*", "b1").await?, 0);
        assert_eq!(store.keys(), strings(&["ns:a1", "ns:a2"]));
        Ok(())
    })
}

#[test]
fn empty_ignore_string_is_no_restriction() -> TestResult {
    let (invalidator, store, _) = setup(&["ns:a1", "ns:a2"]);

    block_on(async {
        assert_eq!(invalidator.delete_ignoring("a*", "").await?, 2);
        assert!(store.keys().is_empty());
        Ok(())
    })
}

#[test]
fn namespaces_are_isolated() -> TestResult {
    let store = MockStore::with_keys(["users:1", "orders:1"]);
    let invalidator = Invalidator::builder(store.clone()).prefix("users").build();

    block_on(async {
        assert_eq!(invalidator.delete("*").await?, 1);
        assert_eq!(store.keys(), strings(&["orders:1"]));
        Ok(())
    })
}

#[test]
fn shared_store_serves_concurrent_requests() -> TestResult {
    let store = Arc::new(MockStore::with_keys(["ns:a1", "ns:b1"]));
    let invalidator = Invalidator::builder(Arc::clone(&store)).prefix("ns").build();

    block_on(async {
        let (a, b) = futures::join!(invalidator.delete("a*"), invalidator.delete("b*"));
        assert_eq!(a? + b?, 2);
        assert!(store.keys().is_empty());
        Ok(())
    })
}

#[tokio::test]
async fn runs_on_tokio() -> TestResult {
    let (invalidator, store, _) = setup(&["ns:a1", "ns:a2"]);

    assert_eq!(invalidator.delete("a*").await?, 2);
    assert!(store.keys().is_empty());
    Ok(())
}
