//! Ranking: stable score-descending sort, tier partition, per-tier caps.

use crate::config::PipelineConfig;
use crate::models::posting::Posting;

/// Tiered view over the admitted postings of one run.
#[derive(Debug, Clone)]
pub struct RankedPostings {
    /// Every admitted posting, score descending. Ties keep extraction order.
    pub admitted: Vec<Posting>,
    pub high: Vec<Posting>,
    pub medium: Vec<Posting>,
    /// Empty under the default admission threshold; populated when the
    /// threshold is relaxed below the medium cutoff.
    pub low: Vec<Posting>,
}

/// Sorts admitted postings and partitions them into capped tiers.
///
/// `sort_by` is stable, so equal scores keep their extraction order and the
/// output is deterministic for a given input.
pub fn rank_postings(mut admitted: Vec<Posting>, config: &PipelineConfig) -> RankedPostings {
    admitted.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();

    for posting in &admitted {
        if posting.match_score >= config.high_score_cutoff {
            if high.len() < config.high_cap {
                high.push(posting.clone());
            }
        } else if posting.match_score >= config.medium_score_cutoff {
            if medium.len() < config.medium_cap {
                medium.push(posting.clone());
            }
        } else if low.len() < config.low_cap {
            low.push(posting.clone());
        }
    }

    RankedPostings {
        admitted,
        high,
        medium,
        low,
    }
}
