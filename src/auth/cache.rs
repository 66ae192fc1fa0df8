//! Access-token cache.
//!
//! Tokens are cached per [`TokenCacheKey`], which is derived from the base URL
//! only. Clients pointed at the same environment share a token; clients pointed
//! at different environments never see each other's token.
//!
//! The default cache is process-wide ([`InMemoryTokenCache::shared`]). Any
//! [`TokenCache`] implementation can be injected through the builder.

use super::AccessToken;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A cached token with the instant it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedAccessToken {
    pub value: AccessToken,
    pub obtained_at: DateTime<Utc>,
    pub ttl_seconds: i64,
}

impl CachedAccessToken {
    /// Negative TTLs are stored as zero, so the entry is already expired.
    pub fn new(value: AccessToken, ttl_seconds: i64) -> Self {
        Self {
            value,
            obtained_at: Utc::now(),
            ttl_seconds: ttl_seconds.max(0),
        }
    }

    /// `obtained_at + ttl_seconds`, saturating at the latest representable
    /// instant. A non-positive TTL expires at `obtained_at`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        if self.ttl_seconds <= 0 {
            return self.obtained_at;
        }
        TimeDelta::try_seconds(self.ttl_seconds)
            .and_then(|ttl| self.obtained_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

/// Cache partition key.
///
/// Serialized as `{"url":"<base_url>"}`. Credentials are not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenCacheKey {
    pub url: String,
}

impl TokenCacheKey {
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            url: base_url.into(),
        }
    }

    /// Stable string form used as the cache key.
    pub fn as_cache_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"url\":{:?}}}", self.url))
    }

    /// Parse a key previously produced by [`TokenCacheKey::as_cache_key`].
    pub fn parse(key: &str) -> Option<Self> {
        serde_json::from_str(key).ok()
    }
}

/// Keyed store of access tokens.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Unexpired token stored under `key`, if any.
    async fn get(&self, key: &str) -> Option<CachedAccessToken>;

    /// Insert or replace the token stored under `key`.
    async fn put(&self, key: &str, token: AccessToken, ttl_seconds: i64);

    /// Remove every entry.
    async fn clear(&self);

    /// Number of stored entries (expired entries not yet dropped included).
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// All stored keys.
    async fn keys(&self) -> Vec<String>;
}

static SHARED_CACHE: Lazy<Arc<InMemoryTokenCache>> =
    Lazy::new(|| Arc::new(InMemoryTokenCache::new()));

/// In-memory [`TokenCache`] with TTL expiry and no other eviction.
#[derive(Debug, Default)]
pub struct InMemoryTokenCache {
    entries: RwLock<HashMap<String, CachedAccessToken>>,
}

impl InMemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by clients built without an explicit one.
    pub fn shared() -> Arc<InMemoryTokenCache> {
        SHARED_CACHE.clone()
    }

    /// Store a pre-built entry as-is, keeping its `obtained_at`.
    pub fn insert_entry(&self, key: impl Into<String>, entry: CachedAccessToken) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), entry);
    }
}

#[async_trait]
impl TokenCache for InMemoryTokenCache {
    async fn get(&self, key: &str) -> Option<CachedAccessToken> {
        let entry = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()?;
        if entry.is_valid() {
            return Some(entry);
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another task may have replaced the expired entry in between.
        if entries.get(key).is_some_and(|current| !current.is_valid()) {
            entries.remove(key);
        }
        None
    }

    async fn put(&self, key: &str, token: AccessToken, ttl_seconds: i64) {
        self.insert_entry(key, CachedAccessToken::new(token, ttl_seconds));
    }

    async fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    async fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    async fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
