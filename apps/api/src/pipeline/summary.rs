//! Aggregate statistics and recommended next actions over admitted postings.

use crate::models::posting::{Posting, Summary};

const TOP_N: usize = 5;

/// Builds the run summary: mean score, most-demanded skills, most frequent
/// companies, and templated next actions.
pub fn build_summary(admitted: &[Posting], high_count: usize, medium_count: usize) -> Summary {
    let average_match_score = if admitted.is_empty() {
        0
    } else {
        let total: u32 = admitted.iter().map(|p| p.match_score).sum();
        (f64::from(total) / admitted.len() as f64).round() as u32
    };

    let top_skills_required =
        top_by_frequency(admitted.iter().flat_map(|p| p.matched_skills.iter()));
    let top_companies = top_by_frequency(admitted.iter().map(|p| &p.company));

    let highlight: Vec<&str> = top_skills_required
        .iter()
        .take(3)
        .map(String::as_str)
        .collect();
    let recommended_actions = vec![
        format!("Apply to {high_count} high-match jobs immediately"),
        format!("Review {medium_count} medium-match jobs for backup"),
        format!("Update resume to highlight: {}", highlight.join(", ")),
        "Set up job alerts on LinkedIn and Naukri".to_string(),
    ];

    Summary {
        average_match_score,
        top_skills_required,
        top_companies,
        recommended_actions,
    }
}

/// Frequency count, descending, ties broken by first-seen order; top five.
fn top_by_frequency<'a, I>(items: I) -> Vec<String>
where
    I: Iterator<Item = &'a String>,
{
    let mut counts: Vec<(String, u32)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(name, _)| name == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item.clone(), 1)),
        }
    }
    // Stable sort: first-seen order wins ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(TOP_N).map(|(name, _)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(company: &str, score: u32, skills: &[&str]) -> Posting {
        Posting {
            title: "SDE".to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            description: String::new(),
            url: format!("https://example.com/{company}/{score}"),
            salary: None,
            source: "example.com".to_string(),
            match_score: score,
            matched_skills: skills.iter().map(|s| s.to_string()).collect(),
            relevance_factors: Vec::new(),
        }
    }

    #[test]
    fn test_average_rounds_to_nearest_integer() {
        let summary = build_summary(
            &[posting("A", 70, &[]), posting("B", 75, &[])],
            1,
            1,
        );
        // (70 + 75) / 2 = 72.5 rounds to 73
        assert_eq!(summary.average_match_score, 73);
    }

    #[test]
    fn test_empty_input_yields_zero_average() {
        let summary = build_summary(&[], 0, 0);
        assert_eq!(summary.average_match_score, 0);
        assert!(summary.top_skills_required.is_empty());
        assert!(summary.top_companies.is_empty());
    }

    #[test]
    fn test_top_skills_ordered_by_frequency_then_first_seen() {
        let postings = vec![
            posting("A", 80, &["Python", "React"]),
            posting("B", 75, &["Python", "SQL"]),
            posting("C", 70, &["React", "Python"]),
        ];
        let summary = build_summary(&postings, 3, 0);
        // Python x3, React x2, SQL x1
        assert_eq!(summary.top_skills_required, vec!["Python", "React", "SQL"]);
    }

    #[test]
    fn test_top_lists_are_capped_at_five() {
        let postings: Vec<Posting> = (0..8)
            .map(|i| posting(&format!("Company{i}"), 60, &[]))
            .collect();
        let summary = build_summary(&postings, 0, 8);
        assert_eq!(summary.top_companies.len(), 5);
    }

    #[test]
    fn test_recommended_actions_carry_bucket_sizes() {
        let summary = build_summary(&[posting("A", 90, &["Python"])], 4, 2);
        assert!(summary.recommended_actions[0].contains("4 high-match"));
        assert!(summary.recommended_actions[1].contains("2 medium-match"));
        assert!(summary.recommended_actions[2].contains("Python"));
        assert_eq!(summary.recommended_actions.len(), 4);
    }
}
