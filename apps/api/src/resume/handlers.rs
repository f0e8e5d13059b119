//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::extract::extract_text;
use crate::resume::ranker::{render_matches, RankedMatch, DEFAULT_TOP_N};
use crate::resume::sections::{split_sections, SectionSet};
use crate::resume::session::ResumeSession;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub resume_id: Uuid,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    /// Headings of the sections detected in the resume.
    pub sections: Vec<String>,
    pub fragment_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub resume_id: Uuid,
    pub file_name: String,
    pub sections: SectionSet,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub matches: Vec<RankedMatch>,
    /// Plain-text `Section:\nContent` rendering of the matches.
    pub rendered: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume
///
/// Multipart upload of a resume PDF. Extracts text, splits it into sections,
/// embeds every fragment, and only then replaces the current session — a
/// failure at any step leaves the previous session untouched.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("resume.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
            file = Some((name, data));
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::Validation("missing `file` field".to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let text = extract_text(&data)?;
    let mut session = ResumeSession::new(file_name, split_sections(&text));
    session.rebuild_index(state.embedder.as_ref()).await?;

    info!(
        "resume {} indexed: {} sections, {} fragments",
        session.id,
        session.sections().len(),
        session.fragment_count()
    );

    let response = UploadResponse {
        resume_id: session.id,
        file_name: session.file_name.clone(),
        uploaded_at: session.uploaded_at,
        sections: session
            .sections()
            .iter()
            .map(|(label, _)| label.heading().to_string())
            .collect(),
        fragment_count: session.fragment_count(),
    };

    *state.session.write().await = Some(session);

    Ok(Json(response))
}

/// GET /api/v1/resume
///
/// Returns the current session's sections as a label → content map.
pub async fn handle_get_resume(
    State(state): State<AppState>,
) -> Result<Json<SectionsResponse>, AppError> {
    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotFound("no resume uploaded".to_string()))?;

    Ok(Json(SectionsResponse {
        resume_id: session.id,
        file_name: session.file_name.clone(),
        sections: session.sections().clone(),
    }))
}

/// POST /api/v1/resume/search
///
/// Ranks the current resume's fragments against a free-text query.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotReady("no resume uploaded".to_string()))?;

    let matches = session
        .search(&request.query, request.top_n, state.embedder.as_ref())
        .await?;
    let rendered = render_matches(&matches);

    Ok(Json(SearchResponse { matches, rendered }))
}
