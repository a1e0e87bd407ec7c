//! Persisted key-value store
//!
//! The game keeps four independent JSON snapshots (daily session, streak,
//! history, daily histogram). Each is read and written through
//! [`PersistedStore`], an injected handle; nothing here knows about game rules.
//!
//! Reads are corrupt-tolerant: [`load_json`] discards a malformed value and
//! reports "nothing stored", so callers fall back to their defaults.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::GameError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Key of the resumable daily session snapshot
pub const DAILY_SESSION_KEY: &str = "daily_session";
/// Key of the win streak record
pub const STREAK_KEY: &str = "streak";
/// Key of the rolling completed-game history
pub const HISTORY_KEY: &str = "history";
/// Key of the daily attempt histogram
pub const HISTOGRAM_KEY: &str = "daily_histogram";

/// Errors from the storage medium itself
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable string key-value storage with optional expiry
#[async_trait]
pub trait PersistedStore: Send + Sync {
    /// Value under `key`, or `None` if missing or expired
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`; `ttl` of `None` never expires
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// A stored value with its expiry instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoredEntry {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    pub fn new(value: String, ttl: Option<Duration>, now: DateTime<Utc>) -> Self {
        let expires_at = ttl.map(|ttl| {
            chrono::Duration::from_std(ttl)
                .ok()
                .and_then(|ttl| now.checked_add_signed(ttl))
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        });
        Self { value, expires_at }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Load and decode the JSON value under `key`
///
/// Returns `None` when nothing usable is stored. A value that fails to decode
/// is deleted and logged; a store read failure is logged. Neither is surfaced.
pub async fn load_json<T: DeserializeOwned>(store: &dyn PersistedStore, key: &str) -> Option<T> {
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "store read failed, using defaults");
            return None;
        }
    };

    match decode(key, &raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "discarding malformed stored value");
            if let Err(e) = store.delete(key).await {
                warn!(key, error = %e, "failed to delete malformed stored value");
            }
            None
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, GameError> {
    serde_json::from_str(raw).map_err(|source| GameError::PersistenceCorruption {
        key: key.to_string(),
        source,
    })
}

/// Encode `value` as JSON and store it under `key`
///
/// # Errors
/// Returns `StoreError` if encoding or the underlying write fails.
pub async fn save_json<T: Serialize + Sync>(
    store: &dyn PersistedStore,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw, ttl).await?;
    debug!(key, "saved");
    Ok(())
}

/// [`save_json`], logging instead of failing
///
/// Used where a lost write must not interrupt the game.
pub async fn save_json_or_warn<T: Serialize + Sync>(
    store: &dyn PersistedStore,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
) {
    if let Err(e) = save_json(store, key, value, ttl).await {
        warn!(key, error = %e, "store write failed");
    }
}
