//! World cache mirror.
//!
//! An in-process, non-authoritative record of which facts have been
//! submitted per world. The mirror is never consulted on the read path; it
//! exists for bookkeeping: the `clear_world` count comes from here, and the
//! health endpoint reports its totals. The engine remains the source of
//! truth for retrieval.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// Mirror totals, surfaced through the health endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of worlds with at least one recorded fact.
    pub worlds: usize,
    /// Total recorded facts across all worlds.
    pub facts: usize,
}

/// Per-world fact cache.
///
/// Entries are created lazily on first write and removed on clear. Facts are
/// kept in submission order.
#[derive(Debug, Default)]
pub struct WorldCache {
    worlds: RwLock<HashMap<String, Vec<String>>>,
}

impl WorldCache {
    pub fn new() -> Self {
        Self {
            worlds: RwLock::new(HashMap::new()),
        }
    }

    /// Append facts to a world's record, creating the entry if absent.
    pub async fn record_write(&self, world_id: &str, facts: &[String]) {
        let mut worlds = self.worlds.write().await;
        worlds
            .entry(world_id.to_string())
            .or_default()
            .extend(facts.iter().cloned());
    }

    /// Remove a world's record and return how many facts it held.
    ///
    /// Clearing a world that was never written is a no-op returning 0.
    pub async fn clear(&self, world_id: &str) -> usize {
        let mut worlds = self.worlds.write().await;
        worlds.remove(world_id).map(|facts| facts.len()).unwrap_or(0)
    }

    /// Number of facts recorded for a world.
    pub async fn fact_count(&self, world_id: &str) -> usize {
        let worlds = self.worlds.read().await;
        worlds.get(world_id).map(|facts| facts.len()).unwrap_or(0)
    }

    /// Snapshot of mirror totals.
    pub async fn stats(&self) -> CacheStats {
        let worlds = self.worlds.read().await;
        CacheStats {
            worlds: worlds.len(),
            facts: worlds.values().map(|facts| facts.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_record_write_creates_entry() {
        let cache = WorldCache::new();
        cache.record_write("w1", &facts(&["a", "b"])).await;

        assert_eq!(cache.fact_count("w1").await, 2);
        assert_eq!(cache.fact_count("w2").await, 0);
    }

    #[tokio::test]
    async fn test_record_write_appends_in_order() {
        let cache = WorldCache::new();
        cache.record_write("w1", &facts(&["a"])).await;
        cache.record_write("w1", &facts(&["b", "c"])).await;

        let worlds = cache.worlds.read().await;
        assert_eq!(worlds["w1"], facts(&["a", "b", "c"]));
    }

    #[tokio::test]
    async fn test_clear_returns_count_and_removes_entry() {
        let cache = WorldCache::new();
        cache.record_write("w1", &facts(&["a", "b", "c"])).await;

        assert_eq!(cache.clear("w1").await, 3);
        assert_eq!(cache.fact_count("w1").await, 0);
    }

    #[tokio::test]
    async fn test_clear_unknown_world_is_zero() {
        let cache = WorldCache::new();
        assert_eq!(cache.clear("never_seen").await, 0);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let cache = WorldCache::new();
        cache.record_write("w1", &facts(&["a"])).await;

        assert_eq!(cache.clear("w1").await, 1);
        assert_eq!(cache.clear("w1").await, 0);
    }

    #[tokio::test]
    async fn test_clear_leaves_other_worlds_intact() {
        let cache = WorldCache::new();
        cache.record_write("w1", &facts(&["a"])).await;
        cache.record_write("w2", &facts(&["b", "c"])).await;

        cache.clear("w1").await;
        assert_eq!(cache.fact_count("w2").await, 2);
    }

    #[tokio::test]
    async fn test_stats_totals() {
        let cache = WorldCache::new();
        assert_eq!(cache.stats().await, CacheStats::default());

        cache.record_write("w1", &facts(&["a", "b"])).await;
        cache.record_write("w2", &facts(&["c"])).await;

        let stats = cache.stats().await;
        assert_eq!(stats.worlds, 2);
        assert_eq!(stats.facts, 3);
    }
}
