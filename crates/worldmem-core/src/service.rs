//! World memory orchestration service.
//!
//! Composes the tagger, rebuild coalescer, cache mirror, and readiness state
//! over the engine contract into the three tenant operations: remember,
//! recall, and clear_world. One instance is constructed at startup and
//! shared by reference into every request handler; there is no module-level
//! state.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::coalescer::{DEFAULT_REBUILD_WINDOW, RebuildCoalescer};
use crate::engine::{KnowledgeEngine, QueryMode};
use crate::error::{Error, Result};
use crate::mirror::{CacheStats, WorldCache};
use crate::readiness::Readiness;
use crate::tagger;

/// Default number of recall results when the caller does not ask for one.
pub const DEFAULT_RECALL_LIMIT: usize = 5;
/// Smallest accepted recall limit.
pub const MIN_RECALL_LIMIT: usize = 1;
/// Largest accepted recall limit.
pub const MAX_RECALL_LIMIT: usize = 20;

/// Orchestration tunables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Minimum spacing between granted index rebuilds.
    pub rebuild_window: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            rebuild_window: DEFAULT_REBUILD_WINDOW,
        }
    }
}

/// Multi-world memory service over a single knowledge engine.
pub struct MemoryService {
    engine: Arc<dyn KnowledgeEngine>,
    coalescer: RebuildCoalescer,
    cache: WorldCache,
    /// Exclusive section around `engine.rebuild`: the coalescer decides
    /// *whether* to rebuild, this lock ensures granted rebuilds never
    /// overlap in execution.
    rebuild_lock: Mutex<()>,
    readiness: Readiness,
}

impl MemoryService {
    /// Initialize the service: reset the engine once and fix readiness for
    /// the process lifetime.
    ///
    /// A failed reset leaves the service degraded rather than aborting, so
    /// health and introspection stay answerable.
    pub async fn initialize(engine: Arc<dyn KnowledgeEngine>, config: ServiceConfig) -> Self {
        info!("Initializing knowledge engine...");
        let readiness = match engine.reset(true).await {
            Ok(()) => {
                info!("Knowledge engine initialized");
                Readiness::Ready
            }
            Err(err) => {
                error!(error = %err, "Knowledge engine failed to initialize, serving degraded");
                Readiness::Degraded
            }
        };

        Self {
            engine,
            coalescer: RebuildCoalescer::new(config.rebuild_window),
            cache: WorldCache::new(),
            rebuild_lock: Mutex::new(()),
            readiness,
        }
    }

    /// Current readiness state.
    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    /// Whether tenant operations are being served.
    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    /// Mirror totals for diagnostics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Store facts for one world.
    ///
    /// Facts are tagged with the world marker and submitted to the engine in
    /// the order given. After the writes land, the coalescer decides whether
    /// an index rebuild is due; a failed rebuild is logged and retried on a
    /// later write, but the facts already stored still count.
    pub async fn remember(&self, world_id: &str, facts: &[String]) -> Result<usize> {
        self.ensure_ready()?;
        tagger::validate_world_id(world_id)?;
        if facts.is_empty() {
            return Err(Error::validation("facts must contain at least one entry"));
        }
        for fact in facts {
            tagger::validate_fact(fact)?;
        }

        info!(world_id, count = facts.len(), "Remembering facts");
        for fact in facts {
            self.engine.add(&tagger::tag(fact, world_id)).await?;
        }

        self.maybe_rebuild(world_id).await;
        self.cache.record_write(world_id, facts).await;

        Ok(facts.len())
    }

    /// Query one world's memory.
    ///
    /// The query is tagged like a fact so the engine's relevance matching
    /// keeps worlds apart; results come back with the marker stripped.
    pub async fn recall(&self, world_id: &str, query: &str, limit: usize) -> Result<Vec<String>> {
        self.ensure_ready()?;
        tagger::validate_world_id(world_id)?;
        tagger::validate_query(query)?;
        let limit = limit.clamp(MIN_RECALL_LIMIT, MAX_RECALL_LIMIT);

        info!(world_id, query, "Recalling facts");
        let tagged = tagger::tag(query, world_id);
        let hits = self.engine.query(QueryMode::Insights, &tagged).await?;

        let results: Vec<String> = hits
            .into_iter()
            .take(limit)
            .map(|hit| tagger::untag(&hit.text, world_id).to_string())
            .collect();

        debug!(world_id, count = results.len(), "Recall complete");
        Ok(results)
    }

    /// Drop the local record of one world.
    ///
    /// Only the cache mirror is cleared; the engine keeps the world's facts
    /// (it exposes no selective deletion by tag). Clearing an unknown world
    /// is a no-op returning 0.
    pub async fn clear_world(&self, world_id: &str) -> Result<usize> {
        self.ensure_ready()?;
        tagger::validate_world_id(world_id)?;

        let cleared = self.cache.clear(world_id).await;
        info!(world_id, cleared, "Cleared world memory cache");
        Ok(cleared)
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.readiness.is_ready() {
            Ok(())
        } else {
            Err(Error::NotReady)
        }
    }

    /// Trigger an index rebuild if the coalescing window has elapsed.
    ///
    /// The claim is taken before the exclusive section so concurrent writers
    /// inside one window settle on a single rebuild; if the rebuild itself
    /// fails the claim is released and the next eligible write retries.
    async fn maybe_rebuild(&self, world_id: &str) {
        let Some(claim) = self.coalescer.try_claim() else {
            debug!(world_id, "Skipping rebuild inside coalescing window");
            return;
        };

        let _guard = self.rebuild_lock.lock().await;
        info!(world_id, "Triggering knowledge index rebuild");
        if let Err(err) = self.engine.rebuild().await {
            warn!(world_id, error = %err, "Index rebuild failed, will retry on a later write");
            self.coalescer.release(claim);
        }
    }
}
