//! Job-posting extraction from scraped careers-page text.
//!
//! The page fetch/scrape itself is the caller's problem — this module takes
//! already-scraped text, asks the LLM for structured postings, and normalizes
//! the JSON it gets back (single object or array, fenced or bare).

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::outreach::prompts::{JOB_EXTRACT_PROMPT_TEMPLATE, JOB_EXTRACT_SYSTEM};

/// Placeholder the model is instructed to use for fields it cannot find.
pub const NOT_SPECIFIED: &str = "Not specified";

fn not_specified() -> String {
    NOT_SPECIFIED.to_string()
}

/// One job posting extracted from a careers page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default = "not_specified")]
    pub company_name: String,
    #[serde(default = "not_specified")]
    pub role: String,
    #[serde(default = "not_specified")]
    pub experience: String,
    #[serde(default = "not_specified", deserialize_with = "string_or_list")]
    pub skills: String,
    #[serde(default = "not_specified")]
    pub description: String,
}

/// The model sometimes returns `skills` as a JSON array; accept both shapes
/// and join arrays with ", ".
fn string_or_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrList {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::One(s) => s,
        StringOrList::Many(items) => items.join(", "),
    })
}

/// Extracts job postings from scraped page text via the LLM.
pub async fn extract_jobs(page_text: &str, llm: &LlmClient) -> Result<Vec<JobPosting>, AppError> {
    let prompt = JOB_EXTRACT_PROMPT_TEMPLATE.replace("{page_data}", page_text);
    let raw = llm.complete(&prompt, JOB_EXTRACT_SYSTEM).await?;
    let postings = parse_postings(&raw)?;
    Ok(postings)
}

/// Parses LLM output as either a single posting object or an array of them,
/// normalized to a list. Fences are stripped first.
pub(crate) fn parse_postings(raw: &str) -> Result<Vec<JobPosting>, LlmError> {
    let text = strip_json_fences(raw);
    let value: serde_json::Value = serde_json::from_str(text)?;
    let postings = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<_>, _>>()?,
        object => vec![serde_json::from_value(object)?],
    };
    Ok(postings)
}
