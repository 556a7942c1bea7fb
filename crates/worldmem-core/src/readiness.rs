//! Service readiness.
//!
//! The engine is reset exactly once at process start. The outcome fixes the
//! readiness state for the process lifetime: there is no transition out of
//! `Degraded` other than a restart. All tenant-facing operations require
//! `Ready`; health and introspection answer in every state.

/// Outcome of engine initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Engine reset succeeded; tenant operations are served.
    Ready,
    /// Engine reset failed; tenant operations are refused until restart.
    Degraded,
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        matches!(self, Readiness::Ready)
    }

    /// Health endpoint wording for this state.
    pub fn health_status(self) -> &'static str {
        match self {
            Readiness::Ready => "healthy",
            Readiness::Degraded => "unhealthy",
        }
    }

    /// Service descriptor wording for this state.
    pub fn service_status(self) -> &'static str {
        match self {
            Readiness::Ready => "running",
            Readiness::Degraded => "degraded",
        }
    }
}
