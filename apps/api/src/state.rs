use std::sync::Arc;

use tokio::sync::RwLock;

use crate::embedder::Embedder;
use crate::llm_client::LlmClient;
use crate::resume::session::ResumeSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable embedding capability. Default: OpenAI-compatible HTTP backend.
    pub embedder: Arc<dyn Embedder>,
    /// The one current resume session. Uploads replace it wholesale
    /// (last-write-wins) — embeddings and sections are swapped together, so a
    /// failed upload never disturbs the previous pair.
    pub session: Arc<RwLock<Option<ResumeSession>>>,
}
