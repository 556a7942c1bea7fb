//! Knowledge engine contract.
//!
//! The engine is an external collaborator: it ingests flat text, rebuilds a
//! derived index from the whole accumulated corpus, and answers relevance
//! queries. It is treated as correct but slow and stateful, and is consumed
//! only through this narrow contract.
//!
//! `rebuild` must be invoked through the coalescer, never directly from a
//! request path.

pub mod http;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use http::HttpEngine;

/// Result type alias for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Failures reported by the underlying engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("engine returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed engine response: {0}")]
    Decode(String),
}

/// Retrieval style for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Derived/relational answers biased toward the knowledge graph.
    Insights,
    /// Raw text-chunk matches.
    Chunks,
}

impl QueryMode {
    /// Wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryMode::Insights => "insights",
            QueryMode::Chunks => "chunks",
        }
    }
}

/// A single query result from the engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EngineHit {
    pub text: String,
}

/// Contract for the external knowledge-retrieval engine.
///
/// `add` is append-only and safe to call concurrently with other `add`s and
/// with `query`. `rebuild` reconstructs global derived state and must be
/// held inside an exclusive section by the caller.
#[async_trait]
pub trait KnowledgeEngine: Send + Sync {
    /// Ingest one piece of text into the corpus.
    async fn add(&self, text: &str) -> EngineResult<()>;

    /// Rebuild the derived index from the entire accumulated corpus.
    /// Expensive and global.
    async fn rebuild(&self) -> EngineResult<()>;

    /// Answer a relevance query in the given retrieval style.
    async fn query(&self, mode: QueryMode, text: &str) -> EngineResult<Vec<EngineHit>>;

    /// Reset engine state. Invoked once at startup.
    async fn reset(&self, full: bool) -> EngineResult<()>;
}
