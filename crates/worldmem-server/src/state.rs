//! Application state.

use std::sync::Arc;
use std::time::Instant;
use worldmem_core::MemoryService;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
#[allow(dead_code)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// World memory orchestration service
    pub memory: Arc<MemoryService>,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, memory: MemoryService) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(config),
            memory: Arc::new(memory),
            start_time: Instant::now(),
        })
    }
}
