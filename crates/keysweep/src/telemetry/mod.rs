// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Invalidation telemetry integration with `tracing` and OpenTelemetry.
//!
//! When the `logs` feature is enabled, invalidation activity is emitted as structured
//! `tracing` events. When the `metrics` feature is enabled, activity is counted and the
//! number of keys removed per request is recorded through an OpenTelemetry meter.

pub(crate) mod attributes;
pub(crate) mod ext;
#[cfg(any(feature = "logs", feature = "metrics", test))]
pub(crate) mod metrics;
#[cfg(test)]
pub(crate) mod testing;

#[cfg(any(feature = "logs", feature = "metrics", test))]
use std::sync::Arc;

#[cfg(any(feature = "logs", feature = "metrics", test))]
use opentelemetry::{
    KeyValue,
    metrics::{Counter, Histogram, Meter, MeterProvider},
};

/// Invalidation telemetry provider.
///
/// Construct this and pass it to the invalidator builder via `.telemetry()`.
/// Available with the `logs` or `metrics` feature.
#[derive(Clone, Debug)]
pub struct InvalidationTelemetry {
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    inner: Arc<TelemetryInner>,
}

#[cfg(any(feature = "logs", feature = "metrics", test))]
#[derive(Debug)]
struct TelemetryInner {
    logging_enabled: bool,
    event_counter: Option<Counter<u64>>,
    deleted_keys: Option<Histogram<u64>>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Operation {
    Delete,
    Enumerate,
    Validate,
}

impl Operation {
    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(dead_code, reason = "names are only read by log and metric sinks")
    )]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "invalidation.delete",
            Self::Enumerate => "invalidation.enumerate",
            Self::Validate => "invalidation.validate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Activity {
    Deleted,
    Absent,
    Enumerated,
    Skipped,
    Rejected,
    Error,
}

impl Activity {
    #[cfg_attr(
        not(any(feature = "logs", feature = "metrics", test)),
        expect(dead_code, reason = "names are only read by log and metric sinks")
    )]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deleted => "invalidation.deleted",
            Self::Absent => "invalidation.absent",
            Self::Enumerated => "invalidation.enumerated",
            Self::Skipped => "invalidation.skipped",
            Self::Rejected => "invalidation.rejected",
            Self::Error => "invalidation.error",
        }
    }
}

#[cfg(any(feature = "logs", feature = "metrics", test))]
impl InvalidationTelemetry {
    /// Creates a new telemetry collector.
    ///
    /// # Arguments
    ///
    /// * `logging_enabled` - Emit structured `tracing` events for invalidation activity
    /// * `meter` - Meter to record metrics with, or `None` to skip metrics
    #[must_use]
    pub fn new(logging_enabled: bool, meter: Option<&Meter>) -> Self {
        Self {
            inner: Arc::new(TelemetryInner {
                logging_enabled,
                event_counter: meter.map(metrics::create_event_counter),
                deleted_keys: meter.map(metrics::create_deleted_keys_histogram),
            }),
        }
    }

    /// Creates a telemetry collector that records through a `keysweep` meter obtained
    /// from `meter_provider`.
    #[must_use]
    pub fn with_meter_provider(logging_enabled: bool, meter_provider: &dyn MeterProvider) -> Self {
        Self::new(logging_enabled, Some(&metrics::create_meter(meter_provider)))
    }

    /// Records one invalidation activity.
    ///
    /// `key` is logged but never used as a metric attribute.
    pub(crate) fn record(&self, namespace: &str, operation: Operation, activity: Activity, key: &str) {
        if let Some(counter) = &self.inner.event_counter {
            counter.add(
                1,
                &[
                    KeyValue::new(attributes::INVALIDATION_NAME, namespace.to_owned()),
                    KeyValue::new(attributes::INVALIDATION_OPERATION_NAME, operation.as_str()),
                    KeyValue::new(attributes::INVALIDATION_ACTIVITY_NAME, activity.as_str()),
                ],
            );
        }

        if self.inner.logging_enabled {
            Self::emit(namespace, operation, activity, key);
        }
    }

    /// Records how many keys a completed request removed.
    pub(crate) fn record_deleted(&self, namespace: &str, count: u64) {
        if let Some(histogram) = &self.inner.deleted_keys {
            histogram.record(count, &[KeyValue::new(attributes::INVALIDATION_NAME, namespace.to_owned())]);
        }
    }

    #[cfg_attr(
        not(any(feature = "logs", test)),
        expect(unused_variables, reason = "events are only emitted with the logs feature")
    )]
    fn emit(namespace: &str, operation: Operation, activity: Activity, key: &str) {
        #[cfg(any(feature = "logs", test))]
        {
            let op = operation.as_str();
            let act = activity.as_str();

            // Tracing level must be constant, so a macro selects the level per activity.
            // Field names must match constants in attributes.rs.
            macro_rules! emit_event {
                ($level:ident) => {
                    tracing::$level!(
                        invalidation.name = namespace,
                        invalidation.operation = op,
                        invalidation.activity = act,
                        invalidation.key = key,
                        "invalidation.event"
                    )
                };
            }

            match activity {
                Activity::Error => emit_event!(error),
                Activity::Rejected => emit_event!(warn),
                Activity::Deleted | Activity::Absent => emit_event!(info),
                Activity::Enumerated | Activity::Skipped => emit_event!(debug),
            }
        }
    }
}
