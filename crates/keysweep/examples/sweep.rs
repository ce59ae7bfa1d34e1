// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Wildcard sweeps over a mock store with structured logging and listeners.

use keysweep::{Concurrency, InvalidationListener, InvalidationTelemetry, Invalidator};
use keysweep_store::testing::{MockStore, StoreOp};

struct PrintDeletions;

impl InvalidationListener for PrintDeletions {
    fn on_message(&self, message: &str) {
        println!("listener: {message}");
    }

    fn on_error(&self, error: &keysweep::Error) {
        println!("listener error: {}", error.kind());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let store = MockStore::with_keys(["users:1", "users:2", "users:10", "users:admin", "orders:1"]);
    let invalidator = Invalidator::builder(store.clone())
        .prefix("users:")
        .concurrency(Concurrency::limited(2))
        .listener(PrintDeletions)
        .telemetry(InvalidationTelemetry::new(true, None))
        .build();

    // `1` also protects `users:10`: ignoring is substring based.
    let deleted = invalidator.delete_ignoring("*", ["admin", "1"]).await.expect("sweep failed");
    println!("deleted {deleted}, remaining: {:?}", store.keys());

    // Store failures surface as errors.
    store.fail_when(|op| matches!(op, StoreOp::EnumerateKeys(_)));
    match invalidator.delete("*").await {
        Ok(count) => println!("unexpected success: {count}"),
        Err(e) => println!("sweep failed: {}", e.kind()),
    }

    // Missing arguments are reported to listeners.
    invalidator
        .delete_with(Some("*"), None::<fn(keysweep::Result<u64>)>, None::<&str>)
        .await;
}
