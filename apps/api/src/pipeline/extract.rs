//! Heuristic posting extraction: pure field derivation from one raw search
//! result. No network calls.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::models::posting::{Posting, RawResult};

const TITLE_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 300;

/// Structurally unusable raw result. The producer discards the result and
/// moves on; extraction never panics.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("result has no URL")]
    MissingUrl,
}

/// "<role> at <company>" pattern common to job-board titles.
static COMPANY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)at\s+([^-|]+)").expect("company pattern"));

/// Fixed city/region vocabulary for location detection.
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Bangalore|Mumbai|Delhi|Hyderabad|Pune|Chennai|Remote|Hybrid|Bengaluru|NCR")
        .expect("location pattern")
});

/// Currency amount followed by a magnitude or period marker.
static SALARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)₹?\s*\d{1,3}[,.]?\d{0,3}\s*(?:k|lakh|LPA|per month|/month)")
        .expect("salary pattern")
});

/// Derives a structured posting from one raw result. Fails only on
/// unrecoverable structural problems (missing URL); every other field falls
/// back to a sentinel. Scores are attached later by the scorer.
pub fn extract_posting(result: &RawResult) -> Result<Posting, ExtractionError> {
    if result.url.trim().is_empty() {
        return Err(ExtractionError::MissingUrl);
    }

    let location = LOCATION_RE
        .find(&result.content)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "India".to_string());

    let salary = SALARY_RE.find(&result.content).map(|m| m.as_str().to_string());

    let source = result
        .url
        .split('/')
        .nth(2)
        .filter(|host| !host.is_empty())
        .unwrap_or("web")
        .to_string();

    Ok(Posting {
        title: truncate_chars(&result.title, TITLE_MAX_CHARS),
        company: extract_company(&result.title, &result.url),
        location,
        description: truncate_chars(&result.content, DESCRIPTION_MAX_CHARS),
        url: result.url.clone(),
        salary,
        source,
        match_score: 0,
        matched_skills: Vec::new(),
        relevance_factors: Vec::new(),
    })
}

fn extract_company(title: &str, url: &str) -> String {
    if url.contains("linkedin.com") {
        company_from_title(title).unwrap_or_else(|| "LinkedIn".to_string())
    } else if url.contains("naukri.com") {
        "Naukri".to_string()
    } else if url.contains("instahyre.com") {
        "Instahyre".to_string()
    } else {
        company_from_title(title).unwrap_or_else(|| "See Website".to_string())
    }
}

fn company_from_title(title: &str) -> Option<String> {
    COMPANY_RE
        .captures(title)
        .map(|captures| captures[1].trim().to_string())
        .filter(|company| !company.is_empty())
}

/// Char-boundary-safe prefix truncation.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
