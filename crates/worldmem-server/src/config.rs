//! Server configuration.
//!
//! Defaults, overridden by an optional TOML file, overridden by
//! `WORLDMEM_*` environment variables.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use worldmem_core::ServiceConfig;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the REST API listens on
    pub bind_addr: String,
    /// Base URL of the knowledge engine sidecar
    pub engine_url: String,
    /// Per-request timeout against the engine, in seconds
    pub engine_timeout_secs: u64,
    /// Coalescing window between index rebuilds, in seconds
    pub rebuild_window_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8001".to_string(),
            engine_url: "http://127.0.0.1:8000".to_string(),
            engine_timeout_secs: 120,
            rebuild_window_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Resolution order, later wins:
    /// 1. built-in defaults
    /// 2. TOML file at `WORLDMEM_CONFIG` (default `worldmem.toml`, if present)
    /// 3. `WORLDMEM_BIND`, `WORLDMEM_ENGINE_URL`, `WORLDMEM_ENGINE_TIMEOUT_SECS`,
    ///    `WORLDMEM_REBUILD_WINDOW_SECS`
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("WORLDMEM_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("worldmem.toml"));

        let mut config = if config_path.exists() {
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str(&raw)?
        } else {
            Self::default()
        };

        if let Ok(bind) = std::env::var("WORLDMEM_BIND") {
            config.bind_addr = bind;
        }
        if let Ok(url) = std::env::var("WORLDMEM_ENGINE_URL") {
            config.engine_url = url;
        }
        if let Ok(timeout) = std::env::var("WORLDMEM_ENGINE_TIMEOUT_SECS") {
            config.engine_timeout_secs = timeout.parse()?;
        }
        if let Ok(window) = std::env::var("WORLDMEM_REBUILD_WINDOW_SECS") {
            config.rebuild_window_secs = window.parse()?;
        }

        Ok(config)
    }

    /// Engine request timeout as a duration
    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }

    /// Orchestration-core settings derived from this configuration
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            rebuild_window: Duration::from_secs(self.rebuild_window_secs),
        }
    }
}
