//! The opportunity discovery pipeline: plan, fan out, extract, score, rank,
//! summarize, export.

pub mod collector;
pub mod csv_export;
pub mod extract;
pub mod planner;
pub mod ranker;
pub mod scorer;
pub mod summary;

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::llm_client::ReasoningClient;
use crate::models::posting::{PipelineResult, Posting};
use crate::models::profile::Profile;
use crate::search::SearchProvider;
use crate::usage::{Service, UsageEntry, UsageRecorder};

use self::scorer::{score_with_fallback, LlmMatchScorer, MatchScorer, RuleMatchScorer};

/// The discovery-and-ranking pipeline. Collaborators sit behind trait
/// objects and are shared read-only across runs; the only per-run mutable
/// state is the URL-dedup set inside the collector.
pub struct Pipeline {
    search: Arc<dyn SearchProvider>,
    llm: Arc<dyn ReasoningClient>,
    scorer: Arc<dyn MatchScorer>,
    profile: Arc<Profile>,
    usage: Arc<dyn UsageRecorder>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        llm: Arc<dyn ReasoningClient>,
        profile: Arc<Profile>,
        usage: Arc<dyn UsageRecorder>,
        config: PipelineConfig,
    ) -> Self {
        // Model scoring is the default; the rule scorer takes over wholesale
        // when it is switched off (the fallback path still covers per-posting
        // model failures either way).
        let scorer: Arc<dyn MatchScorer> = if config.model_scoring_enabled {
            Arc::new(LlmMatchScorer::new(llm.clone()))
        } else {
            Arc::new(RuleMatchScorer)
        };
        Self {
            search,
            llm,
            scorer,
            profile,
            usage,
            config,
        }
    }

    /// Runs one full discovery pass. Never returns an error: every internal
    /// failure degrades to a narrower empty or fallback result, and only a
    /// fully empty collection surfaces as `success: false`.
    pub async fn run(&self, query: &str, location: Option<&str>) -> PipelineResult {
        let run_id = Uuid::new_v4();
        let location = location.unwrap_or("India");
        let enhanced_query = format!(
            "{query} {location} internship OR SDE {} passout",
            self.profile.graduation_year
        );
        info!(%run_id, %enhanced_query, "starting discovery run");

        self.usage
            .record(UsageEntry::new(run_id, Service::Reasoning, "expand_queries"));
        let queries = planner::plan_queries(
            &enhanced_query,
            &self.profile,
            self.llm.as_ref(),
            self.config.max_queries,
        )
        .await;

        let raw_results = collector::collect_results(
            self.search.as_ref(),
            &queries,
            self.config.max_results_per_query,
        )
        .await;
        self.usage.record(UsageEntry {
            requests: queries.len() as u32,
            ..UsageEntry::new(run_id, Service::Search, "search")
        });

        if raw_results.is_empty() {
            warn!(%run_id, "no results collected across any query");
            return PipelineResult::failure(
                enhanced_query,
                "No jobs found. Try refining your search.",
            );
        }

        // Bound the scoring workload per run.
        let postings: Vec<Posting> = raw_results
            .iter()
            .take(self.config.max_postings)
            .filter_map(|raw| match extract::extract_posting(raw) {
                Ok(posting) => Some(posting),
                Err(e) => {
                    debug!("discarding result {:?}: {e}", raw.title);
                    None
                }
            })
            .collect();

        self.usage.record(UsageEntry {
            requests: postings.len() as u32,
            ..UsageEntry::new(run_id, Service::Reasoning, "score_posting")
        });
        let scored = self.score_all(postings).await;

        let mut citations = Vec::new();
        let mut admitted = Vec::new();
        for posting in scored {
            if posting.match_score >= self.config.admission_threshold {
                citations.push(format!(
                    "[{}] {} - {}",
                    citations.len() + 1,
                    posting.title,
                    posting.url
                ));
                admitted.push(posting);
            }
        }

        let total_jobs = admitted.len();
        let ranked = ranker::rank_postings(admitted, &self.config);
        let summary =
            summary::build_summary(&ranked.admitted, ranked.high.len(), ranked.medium.len());
        let csv_data = csv_export::to_csv(&ranked.admitted);

        info!(
            %run_id,
            total_jobs,
            high = ranked.high.len(),
            medium = ranked.medium.len(),
            average = summary.average_match_score,
            "discovery run complete"
        );

        PipelineResult {
            success: true,
            search_query: enhanced_query,
            total_jobs,
            high_match_jobs: ranked.high,
            medium_match_jobs: ranked.medium,
            low_match_jobs: ranked.low,
            summary,
            citations,
            csv_data,
            error: None,
            message: None,
        }
    }

    /// Scores postings through a bounded concurrent pool, then restores
    /// extraction order so downstream tie-breaks stay deterministic. One
    /// posting's failure never affects its siblings: the per-posting
    /// fallback absorbs model errors.
    async fn score_all(&self, postings: Vec<Posting>) -> Vec<Posting> {
        let concurrency = self.config.scorer_concurrency.max(1);

        let mut scored: Vec<(usize, Posting)> = stream::iter(postings.into_iter().enumerate())
            .map(|(index, mut posting)| {
                let scorer = self.scorer.clone();
                let profile = self.profile.clone();
                async move {
                    let result = score_with_fallback(scorer.as_ref(), &posting, &profile).await;
                    posting.match_score = result.match_score;
                    posting.matched_skills = result.matched_skills;
                    posting.relevance_factors = result.relevance_factors;
                    (index, posting)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        scored.sort_by_key(|(index, _)| *index);
        scored.into_iter().map(|(_, posting)| posting).collect()
    }
}
