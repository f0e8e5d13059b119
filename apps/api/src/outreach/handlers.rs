//! Axum route handlers for the Outreach API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::outreach::jobs::{extract_jobs, JobPosting, NOT_SPECIFIED};
use crate::outreach::mailer::{draft_email, EmailDraft, DEFAULT_WORD_LIMIT};
use crate::resume::ranker::{RankedMatch, DEFAULT_TOP_N};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractJobsRequest {
    /// Already-scraped careers-page text; fetching the page is the caller's job.
    pub page_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractJobsResponse {
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub job: JobPosting,
    #[serde(default = "default_word_limit")]
    pub word_limit: u32,
}

fn default_word_limit() -> u32 {
    DEFAULT_WORD_LIMIT
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    pub subject: String,
    pub body: String,
    /// The resume excerpts the draft was grounded in.
    pub highlights: Vec<RankedMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/extract
///
/// Extracts structured job postings from scraped careers-page text.
pub async fn handle_extract_jobs(
    State(state): State<AppState>,
    Json(request): Json<ExtractJobsRequest>,
) -> Result<Json<ExtractJobsResponse>, AppError> {
    if request.page_text.trim().is_empty() {
        return Err(AppError::Validation("page_text cannot be empty".to_string()));
    }

    let jobs = extract_jobs(&request.page_text, &state.llm).await?;
    info!("extracted {} job postings", jobs.len());

    Ok(Json(ExtractJobsResponse { jobs }))
}

/// POST /api/v1/outreach/draft
///
/// Drafts a cold email for one posting, grounded in the current resume
/// session. The ranker picks the excerpts most relevant to the posting's
/// skills (falling back to the role when no skills were extracted).
pub async fn handle_draft(
    State(state): State<AppState>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    if request.word_limit == 0 {
        return Err(AppError::Validation("word_limit must be positive".to_string()));
    }

    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotReady("no resume uploaded".to_string()))?;

    let query = match request.job.skills.trim() {
        "" | NOT_SPECIFIED => request.job.role.clone(),
        skills => skills.to_string(),
    };
    let highlights = session
        .search(&query, DEFAULT_TOP_N, state.embedder.as_ref())
        .await?;

    let EmailDraft { subject, body } = draft_email(
        &request.job,
        session.sections(),
        &highlights,
        request.word_limit,
        &state.llm,
    )
    .await?;

    info!(
        "drafted email for '{}' at '{}' with {} highlights",
        request.job.role,
        request.job.company_name,
        highlights.len()
    );

    Ok(Json(DraftResponse {
        subject,
        body,
        highlights,
    }))
}
