// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(any(feature = "logs", feature = "metrics", test))]
pub(crate) const INVALIDATION_NAME: &str = "invalidation.name";

#[cfg(test)]
pub(crate) const INVALIDATION_EVENT_NAME: &str = "invalidation.event";

#[cfg(any(feature = "logs", feature = "metrics", test))]
pub(crate) const INVALIDATION_OPERATION_NAME: &str = "invalidation.operation";

#[cfg(any(feature = "logs", feature = "metrics", test))]
pub(crate) const INVALIDATION_ACTIVITY_NAME: &str = "invalidation.activity";

#[cfg(test)]
pub(crate) const INVALIDATION_KEY_NAME: &str = "invalidation.key";
