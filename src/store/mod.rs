//! Preference store - best-effort persistence across browser storage tiers
//!
//! Each tier is one backend the browser may or may not provide:
//! - Durable (localStorage, survives restarts)
//! - Session (sessionStorage, survives reloads)
//! - Cookie (document.cookie, one year lifetime)
//!
//! Reads search every tier in order. Writes land in the first tier that
//! accepts them and are NOT replicated to the others.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod cookie;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use cookie::{CookieJar, CookieTier, MemoryCookieJar, DEFAULT_COOKIE_MAX_AGE_SECS};
pub use memory::{MemoryTier, TierState};

/// Which browser backend a tier stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKind {
    Durable,
    Session,
    Cookie,
}

impl TierKind {
    /// Name of the browser API backing this tier (used in log lines)
    pub fn api_name(&self) -> &'static str {
        match self {
            TierKind::Durable => "localStorage",
            TierKind::Session => "sessionStorage",
            TierKind::Cookie => "cookie",
        }
    }
}

impl fmt::Display for TierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Failure of a single tier operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierError {
    /// The backend does not exist in this execution context
    #[error("storage backend unavailable")]
    Unavailable,
    /// The backend exists but refused the operation (denied, quota exceeded)
    #[error("storage access failed: {0}")]
    Access(String),
}

/// One backend in the fallback chain.
///
/// Values cross this boundary as raw JSON text; the store owns encoding.
pub trait StorageTier {
    fn kind(&self) -> TierKind;
    fn read(&self, key: &str) -> Result<Option<String>, TierError>;
    fn write(&self, key: &str, raw: &str) -> Result<(), TierError>;
    fn delete(&self, key: &str) -> Result<(), TierError>;
}

/// Ordered chain of storage tiers
#[derive(Default)]
pub struct PreferenceStore {
    tiers: Vec<Box<dyn StorageTier>>,
}

impl PreferenceStore {
    /// Create a store that tries `tiers` in the given order
    pub fn new(tiers: Vec<Box<dyn StorageTier>>) -> Self {
        Self { tiers }
    }

    /// Append a tier with the lowest priority so far
    pub fn with_tier(mut self, tier: impl StorageTier + 'static) -> Self {
        self.tiers.push(Box::new(tier));
        self
    }

    /// Tier kinds in priority order
    pub fn tier_kinds(&self) -> Vec<TierKind> {
        self.tiers.iter().map(|t| t.kind()).collect()
    }

    /// Read `key` from the first tier holding a usable value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.locate(key).map(|(_, value)| value)
    }

    /// Like [`get`](Self::get), also reporting which tier answered
    pub fn locate<T: DeserializeOwned>(&self, key: &str) -> Option<(TierKind, T)> {
        for tier in &self.tiers {
            let kind = tier.kind();
            let raw = match tier.read(key) {
                Ok(Some(raw)) if !raw.is_empty() => raw,
                Ok(_) => continue,
                Err(TierError::Unavailable) => {
                    tracing::debug!("store.get - {} unavailable, skipping", kind);
                    continue;
                }
                Err(e) => {
                    tracing::warn!("store.get - failed to read {} from {}: {}", key, kind, e);
                    continue;
                }
            };

            match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    tracing::debug!("store.get - {} value for {}: {}", kind, key, raw);
                    return Some((kind, value));
                }
                Err(e) => {
                    tracing::warn!("store.get - malformed {} value for {}: {}", kind, key, e);
                }
            }
        }

        tracing::debug!("store.get - no value found for {}", key);
        None
    }

    /// Write `value` to the first tier that accepts it.
    ///
    /// Returns false if the value cannot be encoded or every tier refused.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("store.set - cannot encode value for {}: {}", key, e);
                return false;
            }
        };

        for tier in &self.tiers {
            let kind = tier.kind();
            match tier.write(key, &raw) {
                Ok(()) => {
                    tracing::debug!("store.set - saved {} to {}", key, kind);
                    return true;
                }
                Err(TierError::Unavailable) => {
                    tracing::debug!("store.set - {} unavailable, trying next tier", kind);
                }
                Err(e) => {
                    tracing::warn!("store.set - failed to write {} to {}: {}", key, kind, e);
                }
            }
        }

        tracing::warn!("store.set - no storage tier accepted {}", key);
        false
    }

    /// Delete `key` from every tier, whichever holds it.
    ///
    /// Unavailable tiers are skipped; returns false if any available tier
    /// failed to delete.
    pub fn remove(&self, key: &str) -> bool {
        let mut ok = true;
        for tier in &self.tiers {
            match tier.delete(key) {
                Ok(()) | Err(TierError::Unavailable) => {}
                Err(e) => {
                    tracing::warn!("store.remove - failed to remove {} from {}: {}", key, tier.kind(), e);
                    ok = false;
                }
            }
        }
        if ok {
            tracing::debug!("store.remove - removed {} from all storage types", key);
        }
        ok
    }
}
