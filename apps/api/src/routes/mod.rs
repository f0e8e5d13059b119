pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::outreach::handlers as outreach;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resume",
            post(resume::handle_upload).get(resume::handle_get_resume),
        )
        .route("/api/v1/resume/search", post(resume::handle_search))
        // Outreach API
        .route("/api/v1/jobs/extract", post(outreach::handle_extract_jobs))
        .route("/api/v1/outreach/draft", post(outreach::handle_draft))
        .with_state(state)
}
