//! Core pipeline data model: raw search results, structured postings, and
//! the aggregate result returned to callers.

use serde::{Deserialize, Serialize};

/// One raw record from the search provider. Not persisted; lives for the
/// duration of a single collection pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResult {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// One structured job/opportunity record derived from a raw search result.
///
/// `url` is non-empty and unique within one pipeline run; `match_score` is
/// always clamped to [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub source: String,
    pub match_score: u32,
    pub matched_skills: Vec<String>,
    pub relevance_factors: Vec<String>,
}

/// Transient scorer output, merged into a `Posting`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub match_score: u32,
    pub matched_skills: Vec<String>,
    pub relevance_factors: Vec<String>,
}

/// Aggregate statistics over all admitted postings of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub average_match_score: u32,
    pub top_skills_required: Vec<String>,
    pub top_companies: Vec<String>,
    pub recommended_actions: Vec<String>,
}

/// Aggregate result of one pipeline run. Built once per invocation and
/// immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub success: bool,
    pub search_query: String,
    pub total_jobs: usize,
    pub high_match_jobs: Vec<Posting>,
    pub medium_match_jobs: Vec<Posting>,
    pub low_match_jobs: Vec<Posting>,
    pub summary: Summary,
    pub citations: Vec<String>,
    pub csv_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PipelineResult {
    /// Total-failure envelope. No error escapes the pipeline boundary, so a
    /// run that collects nothing is expressed through this shape with
    /// actionable guidance instead of an exception.
    pub fn failure(search_query: String, message: &str) -> Self {
        Self {
            success: false,
            search_query,
            total_jobs: 0,
            high_match_jobs: Vec::new(),
            medium_match_jobs: Vec::new(),
            low_match_jobs: Vec::new(),
            summary: Summary {
                average_match_score: 0,
                top_skills_required: Vec::new(),
                top_companies: Vec::new(),
                recommended_actions: vec![
                    "Try broader search terms".to_string(),
                    "Check job platforms directly".to_string(),
                ],
            },
            citations: Vec::new(),
            csv_data: String::new(),
            error: None,
            message: Some(message.to_string()),
        }
    }
}
