//! Match scoring: pluggable, trait-based scorer that measures one posting
//! against the candidate profile.
//!
//! Primary: `LlmMatchScorer` (reasoning model, strict-JSON output).
//! Fallback: `RuleMatchScorer` (pure Rust, deterministic, always available).

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::llm_client::prompts::{POSTING_ANALYSIS_PROMPT_TEMPLATE, POSTING_ANALYSIS_SYSTEM};
use crate::llm_client::{parse_json_payload, ModelError, ReasoningClient};
use crate::models::posting::{Posting, ScoreResult};
use crate::models::profile::Profile;

/// Maximum entries reported in `matched_skills`.
const MATCHED_SKILLS_CAP: usize = 5;
/// Score every rule-scored posting starts from.
const BASE_SCORE: u32 = 30;
const SKILL_BONUS: u32 = 10;
const TITLE_BONUS: u32 = 15;
const COHORT_BONUS: u32 = 15;
const CONVERSION_BONUS: u32 = 10;
const STIPEND_BONUS: u32 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The match scorer trait. Implement this to swap backends without touching
/// the pipeline.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, posting: &Posting, profile: &Profile) -> Result<ScoreResult, ModelError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmMatchScorer, the primary strategy
// ────────────────────────────────────────────────────────────────────────────

/// Scores via the reasoning model. Failures are expected (quota, timeouts,
/// malformed output) and handled by the caller via `score_with_fallback`.
pub struct LlmMatchScorer {
    llm: Arc<dyn ReasoningClient>,
}

impl LlmMatchScorer {
    pub fn new(llm: Arc<dyn ReasoningClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn score(&self, posting: &Posting, profile: &Profile) -> Result<ScoreResult, ModelError> {
        let prompt = POSTING_ANALYSIS_PROMPT_TEMPLATE
            .replace("{title}", &posting.title)
            .replace("{content}", &posting.description)
            .replace("{profile_summary}", &profile.prompt_summary());

        let text = self.llm.complete(&prompt, POSTING_ANALYSIS_SYSTEM).await?;
        let mut result: ScoreResult = parse_json_payload(&text)?;
        result.match_score = result.match_score.min(100);
        result.matched_skills.truncate(MATCHED_SKILLS_CAP);
        Ok(result)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RuleMatchScorer, the deterministic fallback
// ────────────────────────────────────────────────────────────────────────────

/// Pure rule-based scorer. Fast, deterministic, no model call; the trait
/// impl never returns an error.
pub struct RuleMatchScorer;

#[async_trait]
impl MatchScorer for RuleMatchScorer {
    async fn score(&self, posting: &Posting, profile: &Profile) -> Result<ScoreResult, ModelError> {
        Ok(rule_score(posting, profile))
    }
}

static ROLE_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)intern|sde|software|developer|engineer|graduate").expect("role pattern")
});

static COHORT_WORDS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)passout|fresher|graduate").expect("cohort pattern"));

static CONVERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)ppo|pre.?placement|conversion").expect("conversion pattern"));

static STIPEND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)₹\s*[5-9]\d,?\d{3}|lakh|LPA").expect("stipend pattern"));

/// Deterministic rule scoring.
///
/// Base 30; +10 per matched skill; +15 for a role-keyword title; +15 for
/// cohort markers; +10 for conversion markers; +10 for a high-compensation
/// pattern. Clamped to [0, 100]. Identical `(posting, profile)` inputs
/// always produce an identical result.
pub fn rule_score(posting: &Posting, profile: &Profile) -> ScoreResult {
    let haystack = format!("{} {}", posting.title, posting.description).to_lowercase();

    let mut matched_skills: Vec<String> = profile
        .skills
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .cloned()
        .collect();

    let relevant_title = ROLE_TITLE_RE.is_match(&posting.title);
    let cohort_match = haystack.contains(&profile.graduation_year.to_string())
        || COHORT_WORDS_RE.is_match(&haystack);
    let conversion_match = CONVERSION_RE.is_match(&haystack);
    let stipend_match = STIPEND_RE.is_match(&haystack);

    let mut score = BASE_SCORE + matched_skills.len() as u32 * SKILL_BONUS;
    if relevant_title {
        score += TITLE_BONUS;
    }
    if cohort_match {
        score += COHORT_BONUS;
    }
    if conversion_match {
        score += CONVERSION_BONUS;
    }
    if stipend_match {
        score += STIPEND_BONUS;
    }

    let mut relevance_factors = Vec::new();
    if cohort_match {
        relevance_factors.push(format!("{} batch intake", profile.graduation_year));
    }
    if conversion_match {
        relevance_factors.push("PPO opportunity".to_string());
    }
    if stipend_match {
        relevance_factors.push("Competitive stipend".to_string());
    }
    if matched_skills.len() >= 3 {
        relevance_factors.push(format!("{} skills match", matched_skills.len()));
    }

    matched_skills.truncate(MATCHED_SKILLS_CAP);

    ScoreResult {
        match_score: score.min(100),
        matched_skills,
        relevance_factors,
    }
}

/// Scores one posting with the primary scorer, degrading to the rule scorer
/// on model failure. Never fails, so one bad posting cannot poison a run.
pub async fn score_with_fallback(
    primary: &dyn MatchScorer,
    posting: &Posting,
    profile: &Profile,
) -> ScoreResult {
    match primary.score(posting, profile).await {
        Ok(result) => result,
        Err(e) => {
            warn!(
                "model scoring failed for {} ({e}), using rule fallback",
                posting.url
            );
            rule_score(posting, profile)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
