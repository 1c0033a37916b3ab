use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::GenerationBackend;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable generation backend. Default: GeminiClient; tests use a stub.
    pub backend: Arc<dyn GenerationBackend>,
    pub sessions: SessionStore,
}
