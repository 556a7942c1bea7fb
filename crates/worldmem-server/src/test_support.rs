//! Shared helpers for endpoint tests.

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use worldmem_core::engine::{EngineError, EngineHit, EngineResult, KnowledgeEngine, QueryMode};
use worldmem_core::{MemoryService, ServiceConfig};

use crate::config::Config;
use crate::routes;
use crate::state::AppState;

/// Engine stub with naive token matching: a stored text is a hit when it
/// contains every whitespace token of the query, which is enough for the
/// world marker to keep tenants apart.
pub struct StubEngine {
    added: Mutex<Vec<String>>,
    fail_reset: bool,
    fail_adds: bool,
}

impl StubEngine {
    pub fn new() -> Self {
        Self {
            added: Mutex::new(Vec::new()),
            fail_reset: false,
            fail_adds: false,
        }
    }

    /// Engine whose startup reset fails: the service comes up degraded.
    pub fn failing_reset() -> Self {
        Self {
            fail_reset: true,
            ..Self::new()
        }
    }

    /// Engine whose ingestion fails: tenant writes surface engine errors.
    pub fn failing_adds() -> Self {
        Self {
            fail_adds: true,
            ..Self::new()
        }
    }

    fn error() -> EngineError {
        EngineError::Status {
            status: 500,
            message: "stub failure".to_string(),
        }
    }
}

#[async_trait]
impl KnowledgeEngine for StubEngine {
    async fn add(&self, text: &str) -> EngineResult<()> {
        if self.fail_adds {
            return Err(Self::error());
        }
        self.added.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn rebuild(&self) -> EngineResult<()> {
        Ok(())
    }

    async fn query(&self, _mode: QueryMode, text: &str) -> EngineResult<Vec<EngineHit>> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let hits = self
            .added
            .lock()
            .unwrap()
            .iter()
            .filter(|stored| tokens.iter().all(|token| stored.contains(token)))
            .map(|stored| EngineHit {
                text: stored.clone(),
            })
            .collect();
        Ok(hits)
    }

    async fn reset(&self, _full: bool) -> EngineResult<()> {
        if self.fail_reset {
            Err(Self::error())
        } else {
            Ok(())
        }
    }
}

/// Build a full router over a freshly initialized service.
pub async fn test_router(engine: StubEngine) -> Router {
    let memory = MemoryService::initialize(Arc::new(engine), ServiceConfig::default()).await;
    let state = AppState::new(Config::default(), memory);
    routes::create_router(state)
}

/// Send one request and return the status plus the decoded body.
///
/// JSON bodies come back as parsed values; plain-text error bodies come
/// back as a JSON string value.
pub async fn request(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

pub async fn post_json(
    router: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    request(router, Method::POST, uri, Some(body)).await
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    request(router, Method::GET, uri, None).await
}
