//! Process-wide translation cache

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that found an entry
    pub hits: u64,
    /// Lookups that did not
    pub misses: u64,
    /// Stored translations
    pub entries: usize,
}

/// Concurrent map from exact source text to its translation.
///
/// Keys are case-sensitive and untrimmed. Entries are never evicted and the
/// first value written for a key wins.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: DashMap<String, String>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TranslationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a translation
    pub fn get(&self, text: &str) -> Option<String> {
        match self.entries.get(text) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value().clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a translation; an existing entry for `text` is kept
    pub fn put(&self, text: impl Into<String>, translated: impl Into<String>) {
        let text = text.into();
        if self.entries.contains_key(&text) {
            return;
        }
        debug!("Caching translation for {} chars of text", text.chars().count());
        self.entries.entry(text).or_insert_with(|| translated.into());
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get current statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_get_put() {
        let cache = TranslationCache::new();
        assert_eq!(cache.get("Hanoi"), None);

        cache.put("Hanoi", "Hà Nội");
        assert_eq!(cache.get("Hanoi").as_deref(), Some("Hà Nội"));

        // Keys are exact
        assert_eq!(cache.get("hanoi"), None);
        assert_eq!(cache.get(" Hanoi"), None);
    }

    #[test]
    fn test_first_write_wins() {
        let cache = TranslationCache::new();
        cache.put("economy", "kinh tế");
        cache.put("economy", "something else");

        assert_eq!(cache.get("economy").as_deref(), Some("kinh tế"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats() {
        let cache = TranslationCache::new();
        cache.put("a", "b");
        cache.get("a");
        cache.get("missing");

        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                entries: 1
            }
        );
    }

    #[tokio::test]
    async fn test_concurrent_writers() {
        let cache = Arc::new(TranslationCache::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for j in 0..50 {
                    cache.put(format!("text-{}", j), format!("value-{}", j));
                    cache.put(format!("worker-{}-{}", i, j), "x");
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len(), 50 + 16 * 50);
        assert_eq!(cache.get("text-7").as_deref(), Some("value-7"));
    }
}
