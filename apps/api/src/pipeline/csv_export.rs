//! CSV serialization of the final posting list.
//!
//! Fields are quoted per RFC 4180 by the `csv` crate; list-valued fields
//! join with `"; "` and a missing salary renders as `"Not specified"`.

use tracing::warn;

use crate::models::posting::Posting;

const HEADERS: [&str; 8] = [
    "Title",
    "Company",
    "Location",
    "Salary",
    "Match Score",
    "Matched Skills",
    "Relevance Factors",
    "URL",
];

/// Serializes postings to CSV with a fixed column order. Serialization to an
/// in-memory buffer cannot realistically fail; if it ever does the export
/// degrades to an empty string rather than failing the run.
pub fn to_csv(postings: &[Posting]) -> String {
    match write_csv(postings) {
        Ok(data) => data,
        Err(e) => {
            warn!("CSV serialization failed: {e}");
            String::new()
        }
    }
}

fn write_csv(postings: &[Posting]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for posting in postings {
        let score = posting.match_score.to_string();
        let skills = posting.matched_skills.join("; ");
        let factors = posting.relevance_factors.join("; ");
        writer.write_record([
            posting.title.as_str(),
            posting.company.as_str(),
            posting.location.as_str(),
            posting.salary.as_deref().unwrap_or("Not specified"),
            score.as_str(),
            skills.as_str(),
            factors.as_str(),
            posting.url.as_str(),
        ])?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}
