//! Axum route handlers for the discovery API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::posting::PipelineResult;
use crate::relevance::{rank_feed_posts, FeedInsights, FeedPost, ScoredFeedPost};
use crate::state::AppState;
use crate::usage::UsageEntry;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedRankRequest {
    pub posts: Vec<FeedPost>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_feed_limit")]
    pub limit: usize,
}

fn default_feed_limit() -> usize {
    10
}

#[derive(Debug, Serialize)]
pub struct FeedRankResponse {
    pub posts_analyzed: usize,
    pub relevant_posts: Vec<ScoredFeedPost>,
    pub insights: FeedInsights,
}

/// POST /api/v1/search
///
/// Runs one full discovery pass. Internal failures degrade inside the
/// pipeline, so the response always carries a `PipelineResult`.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<PipelineResult>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let result = state
        .pipeline
        .run(&request.query, request.location.as_deref())
        .await;

    Ok(Json(result))
}

/// POST /api/v1/feed/rank
///
/// Scores pre-harvested feed posts against the fixed keyword groups and
/// returns the ranked slice plus aggregate insights.
pub async fn handle_feed_rank(
    State(state): State<AppState>,
    Json(request): Json<FeedRankRequest>,
) -> Result<Json<FeedRankResponse>, AppError> {
    if request.posts.is_empty() {
        return Err(AppError::Validation("posts cannot be empty".to_string()));
    }

    let posts_analyzed = request.posts.len();
    let (relevant_posts, insights) = rank_feed_posts(
        request.posts,
        state.profile.graduation_year,
        &request.keywords,
        request.limit,
    );

    Ok(Json(FeedRankResponse {
        posts_analyzed,
        relevant_posts,
        insights,
    }))
}

#[derive(Debug, Serialize)]
pub struct UsageReportResponse {
    pub total_requests: u32,
    pub entries: Vec<UsageEntry>,
}

/// GET /api/v1/usage
///
/// Reports the external API usage accumulated by this process.
pub async fn handle_usage_report(State(state): State<AppState>) -> Json<UsageReportResponse> {
    let entries = state.usage.snapshot();
    let total_requests = entries.iter().map(|e| e.requests).sum();
    Json(UsageReportResponse {
        total_requests,
        entries,
    })
}
