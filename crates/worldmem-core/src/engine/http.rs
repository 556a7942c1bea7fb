//! HTTP client for the knowledge engine sidecar.
//!
//! In production the engine runs as a separate service speaking JSON over
//! HTTP. This client maps the [`KnowledgeEngine`] contract onto that wire
//! protocol:
//!
//! - `POST /add`      `{ "text": ... }`
//! - `POST /rebuild`  `{}`
//! - `POST /search`   `{ "mode": ..., "query": ... }` -> `{ "results": [{ "text": ... }] }`
//! - `POST /reset`    `{ "full": ... }`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::{EngineError, EngineHit, EngineResult, KnowledgeEngine, QueryMode};

/// Default per-request timeout against the engine.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct AddRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    mode: &'a str,
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<EngineHit>,
}

/// HTTP-backed knowledge engine.
#[derive(Debug, Clone)]
pub struct HttpEngine {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEngine {
    /// Create a client for the engine at `base_url` with the default
    /// request timeout.
    pub fn new(base_url: impl Into<String>) -> EngineResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout. Rebuilds reprocess
    /// the whole corpus, so the timeout should be generous.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> EngineResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { base_url, client })
    }

    /// The engine base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body and surface non-2xx responses as engine errors.
    async fn post<B: Serialize>(&self, path: &str, body: &B) -> EngineResult<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "engine request");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EngineError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl KnowledgeEngine for HttpEngine {
    async fn add(&self, text: &str) -> EngineResult<()> {
        self.post("/add", &AddRequest { text }).await?;
        Ok(())
    }

    async fn rebuild(&self) -> EngineResult<()> {
        self.post("/rebuild", &json!({})).await?;
        Ok(())
    }

    async fn query(&self, mode: QueryMode, text: &str) -> EngineResult<Vec<EngineHit>> {
        let response = self
            .post(
                "/search",
                &SearchRequest {
                    mode: mode.as_str(),
                    query: text,
                },
            )
            .await?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Decode(e.to_string()))?;
        Ok(body.results)
    }

    async fn reset(&self, full: bool) -> EngineResult<()> {
        self.post("/reset", &json!({ "full": full })).await?;
        Ok(())
    }
}
