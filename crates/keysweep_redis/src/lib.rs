// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Redis-backed [`KeyStore`] for cache invalidation.
//!
//! [`RedisStore`] maps pattern enumeration to `KEYS` and single-key deletion to `DEL`.
//! It holds a [`ConnectionManager`], which multiplexes requests over one connection and
//! reconnects after failures, so a single store can be shared by any number of
//! concurrent invalidation requests.
//!
//! `KEYS` walks the whole keyspace in one blocking server call. Keep namespaces narrow
//! on large databases.
//!
//! # Examples
//!
//! ```no_run
//! use keysweep::Invalidator;
//! use keysweep_redis::RedisStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RedisStore::connect("redis://localhost:6379").await?;
//! let invalidator = Invalidator::builder(store).prefix("sessions").build();
//!
//! let removed = invalidator.delete_ignoring("*", "admin").await?;
//! println!("removed {removed} sessions");
//! # Ok(())
//! # }
//! ```

use keysweep_store::{Error, KeyStore};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// A [`KeyStore`] backed by a Redis server.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connects to the Redis server at `url`, e.g. `redis://localhost:6379/0`.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is malformed or the initial connection fails.
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let client = redis::Client::open(url).map_err(Error::from_message)?;
        let conn = ConnectionManager::new(client).await.map_err(Error::from_message)?;
        Ok(Self::from_manager(conn))
    }

    /// Wraps an existing connection manager.
    #[must_use]
    pub fn from_manager(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl KeyStore for RedisStore {
    async fn enumerate_keys(&self, pattern: &str) -> Result<Vec<String>, Error> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(pattern).await.map_err(Error::from_message)?;
        Ok(keys)
    }

    async fn delete_key(&self, key: &str) -> Result<u64, Error> {
        let mut conn = self.conn.clone();
        let deleted: u64 = conn.del(key).await.map_err(Error::from_message)?;
        Ok(deleted)
    }
}
