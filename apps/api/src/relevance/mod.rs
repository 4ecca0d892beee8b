//! Feed-post relevance scoring: deterministic keyword-group scoring of
//! pre-harvested social posts, with ranking and insight aggregates.
//!
//! The feed scraper is an external collaborator; this module only consumes
//! its output.

use serde::{Deserialize, Serialize};

const COHORT_WEIGHT: u32 = 10;
const HIRING_WEIGHT: u32 = 5;
const ROLE_WEIGHT: u32 = 7;
const INTERNSHIP_WEIGHT: u32 = 6;
const RECRUITER_WEIGHT: u32 = 4;
const CUSTOM_WEIGHT: u32 = 8;

const HIRING_KEYWORDS: [&str; 5] = [
    "hiring",
    "we are hiring",
    "we're hiring",
    "join us",
    "apply now",
];
const ROLE_KEYWORDS: [&str; 5] = [
    "sde",
    "software engineer",
    "software developer",
    "developer",
    "engineer",
];
const INTERNSHIP_KEYWORDS: [&str; 4] = ["intern", "internship", "summer intern", "winter intern"];
const RECRUITER_KEYWORDS: [&str; 4] = ["hr", "recruitment", "recruiter", "talent acquisition"];

const INSIGHT_TOP_N: usize = 10;

/// One pre-harvested social-feed post at the module boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPost {
    pub author: String,
    #[serde(default)]
    pub author_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub text: String,
    pub url: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: u32,
}

/// Engagement tier derived from raw reaction counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engagement {
    High,
    Medium,
    Low,
}

impl Engagement {
    /// Comments weigh three times likes.
    fn from_counts(likes: u32, comments: u32) -> Self {
        let total = likes + comments * 3;
        if total > 100 {
            Engagement::High
        } else if total > 20 {
            Engagement::Medium
        } else {
            Engagement::Low
        }
    }
}

/// A feed post with its relevance verdict attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredFeedPost {
    #[serde(flatten)]
    pub post: FeedPost,
    pub relevance_score: u32,
    pub matched_keywords: Vec<String>,
    pub engagement: Engagement,
}

/// Aggregates computed over the ranked posts.
#[derive(Debug, Clone, Serialize)]
pub struct FeedInsights {
    pub trending_companies: Vec<String>,
    pub popular_keywords: Vec<String>,
    pub top_hashtags: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Scores one post's text against the fixed keyword groups plus caller
/// keywords. Deterministic; returns the score and the deduplicated matches
/// in first-hit order.
pub fn score_post_text(
    text: &str,
    graduation_year: u16,
    custom_keywords: &[String],
) -> (u32, Vec<String>) {
    let lower = text.to_lowercase();
    let year = graduation_year.to_string();
    let cohort_keywords = [
        year.clone(),
        format!("{year} batch"),
        format!("{year} passout"),
        format!("{year} graduate"),
    ];

    let mut score = 0;
    let mut matched: Vec<String> = Vec::new();

    tally(
        &lower,
        cohort_keywords.iter().map(String::as_str),
        COHORT_WEIGHT,
        &mut score,
        &mut matched,
    );
    tally(&lower, HIRING_KEYWORDS, HIRING_WEIGHT, &mut score, &mut matched);
    tally(&lower, ROLE_KEYWORDS, ROLE_WEIGHT, &mut score, &mut matched);
    tally(
        &lower,
        INTERNSHIP_KEYWORDS,
        INTERNSHIP_WEIGHT,
        &mut score,
        &mut matched,
    );
    tally(
        &lower,
        RECRUITER_KEYWORDS,
        RECRUITER_WEIGHT,
        &mut score,
        &mut matched,
    );
    tally(
        &lower,
        custom_keywords.iter().map(String::as_str),
        CUSTOM_WEIGHT,
        &mut score,
        &mut matched,
    );

    let mut deduped = Vec::new();
    for keyword in matched {
        if !deduped.contains(&keyword) {
            deduped.push(keyword);
        }
    }

    (score, deduped)
}

fn tally<'a, I>(lower: &str, keywords: I, weight: u32, score: &mut u32, matched: &mut Vec<String>)
where
    I: IntoIterator<Item = &'a str>,
{
    for keyword in keywords {
        if lower.contains(&keyword.to_lowercase()) {
            *score += weight;
            matched.push(keyword.to_string());
        }
    }
}

/// Scores, filters, and ranks harvested posts. Posts with zero relevance are
/// dropped; the rest sort score-descending (stable) and are capped at
/// `limit`. Insights are computed over the returned slice.
pub fn rank_feed_posts(
    posts: Vec<FeedPost>,
    graduation_year: u16,
    custom_keywords: &[String],
    limit: usize,
) -> (Vec<ScoredFeedPost>, FeedInsights) {
    let mut scored: Vec<ScoredFeedPost> = posts
        .into_iter()
        .filter_map(|post| {
            let (relevance_score, matched_keywords) =
                score_post_text(&post.text, graduation_year, custom_keywords);
            if relevance_score == 0 {
                return None;
            }
            let engagement = Engagement::from_counts(post.likes, post.comments);
            Some(ScoredFeedPost {
                post,
                relevance_score,
                matched_keywords,
                engagement,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    scored.truncate(limit);

    let insights = build_insights(&scored, graduation_year);
    (scored, insights)
}

fn build_insights(posts: &[ScoredFeedPost], graduation_year: u16) -> FeedInsights {
    let year = graduation_year.to_string();

    // Trending companies: post count weighs ten times raw engagement.
    let mut company_scores: Vec<(String, u64)> = Vec::new();
    for scored in posts {
        let Some(company) = scored.post.company.as_deref().filter(|c| !c.is_empty()) else {
            continue;
        };
        let engagement = u64::from(scored.post.likes) + u64::from(scored.post.comments);
        match company_scores.iter_mut().find(|(name, _)| name == company) {
            Some((_, total)) => *total += 10 + engagement,
            None => company_scores.push((company.to_string(), 10 + engagement)),
        }
    }
    company_scores.sort_by(|a, b| b.1.cmp(&a.1));
    let trending_companies: Vec<String> = company_scores
        .into_iter()
        .take(INSIGHT_TOP_N)
        .map(|(name, _)| name)
        .collect();

    let popular_keywords =
        top_by_frequency(posts.iter().flat_map(|p| p.matched_keywords.iter()));
    let top_hashtags = top_by_frequency(posts.iter().flat_map(|p| p.post.hashtags.iter()));

    let cohort_mentions = posts
        .iter()
        .filter(|p| p.matched_keywords.iter().any(|kw| kw.contains(&year)))
        .count();
    let role_mentions = posts
        .iter()
        .filter(|p| {
            p.matched_keywords
                .iter()
                .any(|kw| ROLE_KEYWORDS.contains(&kw.as_str()))
        })
        .count();
    let recruiter_mentions = posts
        .iter()
        .filter(|p| {
            p.matched_keywords
                .iter()
                .any(|kw| RECRUITER_KEYWORDS.contains(&kw.as_str()))
        })
        .count();
    let high_engagement = posts
        .iter()
        .filter(|p| p.engagement == Engagement::High)
        .count();

    let mut recommendations = Vec::new();
    if cohort_mentions > 0 {
        recommendations.push(format!(
            "{cohort_mentions} posts mention the {year} batch, recruiting season is active"
        ));
    }
    if role_mentions > 0 {
        recommendations.push(format!(
            "{role_mentions} posts reference engineering roles"
        ));
    }
    if recruiter_mentions > 0 {
        recommendations.push(format!(
            "{recruiter_mentions} recruiter posts found, follow them for updates"
        ));
    }
    if high_engagement > 0 {
        recommendations.push(format!(
            "{high_engagement} high-engagement posts, these companies are actively hiring"
        ));
    }
    if !trending_companies.is_empty() {
        let top: Vec<&str> = trending_companies
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        recommendations.push(format!("Top hiring companies: {}", top.join(", ")));
    }
    if !top_hashtags.is_empty() {
        let top: Vec<&str> = top_hashtags.iter().take(5).map(String::as_str).collect();
        recommendations.push(format!("Trending hashtags: {}", top.join(", ")));
    }

    FeedInsights {
        trending_companies,
        popular_keywords,
        top_hashtags,
        recommendations,
    }
}

/// Frequency count, descending, ties broken by first-seen order.
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
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(INSIGHT_TOP_N)
        .map(|(name, _)| name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(text: &str, company: Option<&str>, likes: u32, comments: u32) -> FeedPost {
        FeedPost {
            author: "Someone".to_string(),
            author_title: None,
            company: company.map(str::to_string),
            text: text.to_string(),
            url: "https://feed.example.com/post/1".to_string(),
            hashtags: Vec::new(),
            likes,
            comments,
        }
    }

    #[test]
    fn test_cohort_mentions_score_highest() {
        let (score, matched) = score_post_text("Calling all 2026 batch students", 2026, &[]);
        // "2026" and "2026 batch" both hit the cohort group.
        assert_eq!(score, 2 * COHORT_WEIGHT);
        assert!(matched.contains(&"2026".to_string()));
        assert!(matched.contains(&"2026 batch".to_string()));
    }

    #[test]
    fn test_group_weights_accumulate() {
        let (score, _) = score_post_text("We are hiring an intern", 2026, &[]);
        // "hiring" (5) + "we are hiring" (5) + "intern" (6)
        assert_eq!(score, 16);
    }

    #[test]
    fn test_custom_keywords_score_and_dedup() {
        let custom = vec!["remote".to_string()];
        let (score, matched) = score_post_text("Remote remote REMOTE role", 2026, &custom);
        assert_eq!(score, CUSTOM_WEIGHT);
        assert_eq!(matched, vec!["remote"]);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let custom = vec!["golang".to_string()];
        let text = "Hiring 2026 passout SDE interns, golang preferred";
        assert_eq!(
            score_post_text(text, 2026, &custom),
            score_post_text(text, 2026, &custom)
        );
    }

    #[test]
    fn test_engagement_tiers() {
        assert_eq!(Engagement::from_counts(0, 0), Engagement::Low);
        assert_eq!(Engagement::from_counts(21, 0), Engagement::Medium);
        assert_eq!(Engagement::from_counts(10, 4), Engagement::Medium);
        assert_eq!(Engagement::from_counts(101, 0), Engagement::High);
        assert_eq!(Engagement::from_counts(50, 20), Engagement::High);
    }

    #[test]
    fn test_irrelevant_posts_are_dropped() {
        let posts = vec![
            post("We are hiring SDE interns for the 2026 batch", None, 5, 1),
            post("Look at this sunset photo", None, 500, 40),
        ];
        let (ranked, _) = rank_feed_posts(posts, 2026, &[], 10);
        assert_eq!(ranked.len(), 1);
        assert!(ranked[0].post.text.contains("2026"));
    }

    #[test]
    fn test_ranking_sorts_by_score_and_respects_limit() {
        let posts = vec![
            post("engineer", None, 0, 0),
            post("Hiring 2026 passout SDE interns now, apply now", None, 0, 0),
            post("We are hiring interns", None, 0, 0),
        ];
        let (ranked, _) = rank_feed_posts(posts, 2026, &[], 2);
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].relevance_score >= ranked[1].relevance_score);
        assert!(ranked[0].post.text.contains("2026"));
    }

    #[test]
    fn test_insights_surface_companies_and_recommendations() {
        let posts = vec![
            post("Acme is hiring 2026 batch SDE interns", Some("Acme"), 150, 10),
            post("Globex hiring interns", Some("Globex"), 2, 0),
            post("Acme engineer openings", Some("Acme"), 30, 5),
        ];
        let (_, insights) = rank_feed_posts(posts, 2026, &[], 10);
        assert_eq!(insights.trending_companies[0], "Acme");
        assert!(insights
            .recommendations
            .iter()
            .any(|r| r.contains("2026 batch")));
        assert!(insights
            .recommendations
            .iter()
            .any(|r| r.contains("Top hiring companies")));
    }

    #[test]
    fn test_hashtag_frequency() {
        let mut a = post("hiring interns", Some("Acme"), 0, 0);
        a.hashtags = vec!["#hiring".to_string(), "#sde".to_string()];
        let mut b = post("hiring engineers", Some("Globex"), 0, 0);
        b.hashtags = vec!["#hiring".to_string()];
        let (_, insights) = rank_feed_posts(vec![a, b], 2026, &[], 10);
        assert_eq!(insights.top_hashtags[0], "#hiring");
    }
}
