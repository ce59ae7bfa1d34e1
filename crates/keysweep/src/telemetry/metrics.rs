// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use opentelemetry::{
    InstrumentationScope,
    metrics::{Counter, Histogram, Meter, MeterProvider},
};

const METER_NAME: &str = "keysweep";
const VERSION: &str = "v0.1.0";
const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.47.0";
const INVALIDATION_EVENT_COUNT_NAME: &str = "invalidation.event.count";
const INVALIDATION_DELETED_KEYS_NAME: &str = "invalidation.deleted.keys";

pub(crate) fn create_meter(meter_provider: &dyn MeterProvider) -> Meter {
    meter_provider.meter_with_scope(
        InstrumentationScope::builder(METER_NAME)
            .with_version(VERSION)
            .with_schema_url(SCHEMA_URL)
            .build(),
    )
}

pub(crate) fn create_event_counter(meter: &Meter) -> Counter<u64> {
    meter
        .u64_counter(INVALIDATION_EVENT_COUNT_NAME)
        .with_description("Invalidation events")
        .with_unit("{event}")
        .build()
}

pub(crate) fn create_deleted_keys_histogram(meter: &Meter) -> Histogram<u64> {
    meter
        .u64_histogram(INVALIDATION_DELETED_KEYS_NAME)
        .with_description("Keys removed per invalidation request")
        .with_unit("{key}")
        .build()
}
