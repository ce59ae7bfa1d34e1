// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Recording through an optional telemetry handle.

use crate::telemetry::{Activity, InvalidationTelemetry, Operation};

pub(crate) trait TelemetryExt {
    /// Records an invalidation activity if telemetry is enabled.
    fn record(&self, namespace: &str, operation: Operation, activity: Activity, key: &str);

    /// Records the number of keys a request removed if telemetry is enabled.
    fn record_deleted(&self, namespace: &str, count: u64);
}

impl TelemetryExt for Option<InvalidationTelemetry> {
    #[allow(unused_variables, reason = "No-op when telemetry is disabled")]
    fn record(&self, namespace: &str, operation: Operation, activity: Activity, key: &str) {
        #[cfg(any(feature = "logs", feature = "metrics", test))]
        if let Some(t) = self {
            t.record(namespace, operation, activity, key);
        }
    }

    #[allow(unused_variables, reason = "No-op when telemetry is disabled")]
    fn record_deleted(&self, namespace: &str, count: u64) {
        #[cfg(any(feature = "logs", feature = "metrics", test))]
        if let Some(t) = self {
            t.record_deleted(namespace, count);
        }
    }
}
