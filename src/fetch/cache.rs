use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::Serialize;

/// A fetched rule, ready for injection.
#[derive(Debug, Clone)]
pub struct Rule {
    pub path: String,
    pub title: String,
    pub content: String,
    pub estimated_tokens: usize,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    rule: Rule,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Path-keyed rule cache with lazy TTL expiry.
///
/// An entry past its expiry is treated as absent on the next `get` and
/// removed then; there is no background sweep. The map tolerates concurrent readers
/// and concurrent miss-driven writes; a redundant same-key overwrite is
/// harmless because rule content is idempotent.
#[derive(Debug)]
pub struct RuleCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RuleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a rule, counting a hit or miss.
    pub fn get(&self, path: &str) -> Option<Rule> {
        let expired = match self.entries.get(path) {
            Some(entry) if !entry.is_expired() => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.rule.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(path);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn set(&self, path: impl Into<String>, rule: Rule) {
        let entry = CacheEntry {
            rule,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.insert(path.into(), entry);
    }

    /// Whether a live entry exists. Does not affect hit/miss counters.
    pub fn has(&self, path: &str) -> bool {
        self.entries
            .get(path)
            .is_some_and(|entry| !entry.is_expired())
    }

    pub fn delete(&self, path: &str) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Snapshot of cache effectiveness. `size` counts stored entries,
    /// including any expired ones not yet lazily removed.
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            size: self.entries.len(),
            hits,
            misses,
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }
}
