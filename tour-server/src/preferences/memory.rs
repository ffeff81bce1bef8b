//! In-process preference store.
//!
//! Used when no Neo4j instance is configured. Entries live for a bounded
//! time and are lost on restart.

use std::time::Duration;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use moka::Entry;
use moka::future::Cache as MokaCache;
use tracing::debug;

use super::{PreferenceError, PreferenceStore, Preferences};
use crate::domain::UserId;

/// Configuration for the in-process store.
#[derive(Debug, Clone)]
pub struct MemoryStoreConfig {
    /// TTL for stored preferences.
    pub ttl: Duration,

    /// Maximum number of users kept.
    pub max_capacity: u64,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Preference store backed by a moka cache.
pub struct MemoryPreferenceStore {
    entries: MokaCache<UserId, Preferences>,
}

impl MemoryPreferenceStore {
    pub fn new(config: &MemoryStoreConfig) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { entries }
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new(&MemoryStoreConfig::default())
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn save<'a>(
        &'a self,
        user: &'a UserId,
        preferences: Preferences,
    ) -> BoxFuture<'a, Result<Preferences, PreferenceError>> {
        async move {
            let entry = self
                .entries
                .entry(user.clone())
                .and_upsert_with(|existing| {
                    let mut merged = existing.map(Entry::into_value).unwrap_or_default();
                    merged.merge(preferences);
                    future::ready(merged)
                })
                .await;
            debug!(user = %user, "Saved preferences in memory");
            Ok(entry.into_value())
        }
        .boxed()
    }

    fn get<'a>(
        &'a self,
        user: &'a UserId,
    ) -> BoxFuture<'a, Result<Option<Preferences>, PreferenceError>> {
        async move { Ok(self.entries.get(user).await) }.boxed()
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
