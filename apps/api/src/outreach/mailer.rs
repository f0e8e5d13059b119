//! Cold-email drafting grounded in the uploaded résumé.

use serde::Serialize;

use crate::llm_client::{LlmClient, LlmError};
use crate::outreach::jobs::JobPosting;
use crate::outreach::prompts::{MAIL_PROMPT_TEMPLATE, MAIL_SYSTEM};
use crate::resume::ranker::{render_matches, RankedMatch};
use crate::resume::sections::SectionSet;

/// Word limit applied when the caller does not supply one.
pub const DEFAULT_WORD_LIMIT: u32 = 200;

/// A drafted cold email, ready for review before sending.
#[derive(Debug, Clone, Serialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Deterministic subject line for a posting — no LLM call involved.
pub fn subject_line(job: &JobPosting) -> String {
    format!("Application for {} at {}", job.role, job.company_name)
}

/// Fills the mail prompt with the posting, the full section set, and the
/// top-ranked excerpts selected for this posting.
pub(crate) fn build_mail_prompt(
    job: &JobPosting,
    sections: &SectionSet,
    highlights: &[RankedMatch],
    word_limit: u32,
) -> String {
    let job_json =
        serde_json::to_string_pretty(job).unwrap_or_else(|_| format!("{job:?}"));
    MAIL_PROMPT_TEMPLATE
        .replace("{job_description}", &job_json)
        .replace("{resume_sections}", &sections.to_prompt_text())
        .replace("{highlights}", &render_matches(highlights))
        .replace("{word_limit}", &word_limit.to_string())
}

/// Drafts the email body via the LLM and pairs it with the subject line.
pub async fn draft_email(
    job: &JobPosting,
    sections: &SectionSet,
    highlights: &[RankedMatch],
    word_limit: u32,
    llm: &LlmClient,
) -> Result<EmailDraft, LlmError> {
    let prompt = build_mail_prompt(job, sections, highlights, word_limit);
    let body = llm.complete(&prompt, MAIL_SYSTEM).await?;

    Ok(EmailDraft {
        subject: subject_line(job),
        body: body.trim().to_string(),
    })
}
