//! cache.rs - Optional key/value store for generated word lists and patterns.
//!
//! Values are stored as `serde_json::Value` so that any serializable type can
//! be cached. A miss is never an error: callers fall back to generating the
//! value and write it back.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::errors::BadwordsError;

/// Synchronous key/value store.
pub trait Cache: Debug + Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`. `lifetime` of `None` falls back to the
    /// cache's default lifetime. Returns whether the value was stored.
    fn set(&self, key: &str, value: Value, lifetime: Option<Duration>) -> bool;

    fn remove(&self, key: &str) -> bool;
}

/// Reads `key` and deserializes it, treating undecodable entries as misses.
pub fn load_cached<T: DeserializeOwned>(cache: &dyn Cache, key: &str) -> Option<T> {
    let value = cache.get(key)?;
    match serde_json::from_value(value) {
        Ok(decoded) => {
            debug!("Cache hit for key: {}", key);
            Some(decoded)
        }
        Err(e) => {
            warn!("Ignoring undecodable cache entry '{}': {}", key, e);
            None
        }
    }
}

/// Serializes `value` and stores it under `key` with the default lifetime.
pub fn store_cached<T: Serialize>(cache: &dyn Cache, key: &str, value: &T) -> bool {
    match serde_json::to_value(value) {
        Ok(encoded) => cache.set(key, encoded, None),
        Err(e) => {
            warn!("Failed to encode cache entry '{}': {}", key, e);
            false
        }
    }
}

/// A cache that never holds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    fn has(&self, _key: &str) -> bool {
        false
    }

    fn set(&self, _key: &str, _value: Value, _lifetime: Option<Duration>) -> bool {
        true
    }

    fn remove(&self, _key: &str) -> bool {
        true
    }
}

#[derive(Debug)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// In-process cache. Keys are namespaced with a prefix so that several
/// caches can share one key space without clashing.
#[derive(Debug)]
pub struct MemoryCache {
    prefix: String,
    default_lifetime: Option<Duration>,
    entries: RwLock<HashMap<String, Entry>>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self {
            prefix: Self::DEFAULT_PREFIX.to_string(),
            default_lifetime: None,
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl MemoryCache {
    pub const DEFAULT_PREFIX: &'static str = "badwords_";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: &str) -> Result<Self, BadwordsError> {
        self.set_prefix(prefix)?;
        Ok(self)
    }

    pub fn with_default_lifetime(mut self, lifetime: Option<Duration>) -> Result<Self, BadwordsError> {
        self.set_default_lifetime(lifetime)?;
        Ok(self)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn set_prefix(&mut self, prefix: &str) -> Result<&mut Self, BadwordsError> {
        let trimmed = prefix.trim();
        if trimmed.is_empty() {
            return Err(BadwordsError::invalid(format!(
                "Invalid cache prefix \"{}\". Expected non-empty string.",
                prefix
            )));
        }
        self.prefix = trimmed.to_string();
        Ok(self)
    }

    pub fn default_lifetime(&self) -> Option<Duration> {
        self.default_lifetime
    }

    /// `None` keeps entries until removed.
    pub fn set_default_lifetime(&mut self, lifetime: Option<Duration>) -> Result<&mut Self, BadwordsError> {
        if lifetime.is_some_and(|l| l.is_zero()) {
            return Err(BadwordsError::invalid(
                "Invalid cache lifetime 0. Expected a positive duration.",
            ));
        }
        self.default_lifetime = lifetime;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        let now = Instant::now();
        match self.entries.read() {
            Ok(entries) => entries.values().filter(|e| !e.is_expired(now)).count(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let key = self.key(key);
        let now = Instant::now();
        {
            let entries = self.entries.read().ok()?;
            match entries.get(&key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        debug!("Evicting expired cache entry: {}", key);
        if let Ok(mut entries) = self.entries.write() {
            if entries.get(&key).is_some_and(|e| e.is_expired(now)) {
                entries.remove(&key);
            }
        }
        None
    }

    fn set(&self, key: &str, value: Value, lifetime: Option<Duration>) -> bool {
        let lifetime = lifetime.filter(|l| !l.is_zero()).or(self.default_lifetime);
        let entry = Entry {
            value,
            expires_at: lifetime.map(|l| Instant::now() + l),
        };
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(self.key(key), entry);
                true
            }
            Err(_) => false,
        }
    }

    fn remove(&self, key: &str) -> bool {
        match self.entries.write() {
            Ok(mut entries) => entries.remove(&self.key(key)).is_some(),
            Err(_) => false,
        }
    }
}
