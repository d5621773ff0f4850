use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Key-value store with per-entry expiry, modelled on a Redis-style collaborator.
///
/// Values are opaque strings; the orchestrator stores JSON-encoded analyses.
pub trait AnalysisCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
    #[error("cached payload could not be decoded: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// Process-local cache; last write wins for a key.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAnalysisCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl InMemoryAnalysisCache {
    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .map(|guard| guard.values().filter(|entry| !entry.is_expired()).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnalysisCache for InMemoryAnalysisCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| CacheError::Unavailable("cache mutex poisoned".to_string()))?;

        let expired = match guard.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            guard.remove(key);
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| CacheError::Unavailable("cache mutex poisoned".to_string()))?;

        guard.retain(|_, entry| !entry.is_expired());
        guard.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
        Ok(())
    }
}

/// Cache that stores nothing, for deployments with caching switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalysisCache;

impl AnalysisCache for NoopAnalysisCache {
    fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}
