//! Concurrent query fan-out with per-query failure isolation and
//! first-accepted-wins URL deduplication.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::models::posting::RawResult;
use crate::search::SearchProvider;

/// Runs every query against the provider concurrently and merges unique
/// results. A failing query contributes zero results and does not abort its
/// siblings; only the whole set failing yields an empty output.
///
/// URLs are deduplicated first-accepted-wins. Output order is the order of
/// acceptance and carries no further meaning.
pub async fn collect_results(
    provider: &dyn SearchProvider,
    queries: &[String],
    max_results_per_query: u32,
) -> Vec<RawResult> {
    let searches = queries.iter().map(|query| async move {
        match provider.search(query, max_results_per_query).await {
            Ok(results) => results,
            Err(e) => {
                warn!("search failed for {query:?}: {e}");
                Vec::new()
            }
        }
    });

    let mut seen_urls = HashSet::new();
    let mut merged = Vec::new();
    for results in join_all(searches).await {
        for result in results {
            if seen_urls.insert(result.url.clone()) {
                merged.push(result);
            }
        }
    }

    debug!(
        "collected {} unique results from {} queries",
        merged.len(),
        queries.len()
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ProviderError;
    use async_trait::async_trait;

    fn raw(url: &str) -> RawResult {
        RawResult {
            title: format!("posting {url}"),
            url: url.to_string(),
            content: "some content".to_string(),
        }
    }

    /// Routes query substrings to canned results; everything else errors.
    struct ScriptedSearch {
        routes: Vec<(&'static str, Vec<RawResult>)>,
    }

    #[async_trait]
    impl SearchProvider for ScriptedSearch {
        async fn search(
            &self,
            query: &str,
            _max_results: u32,
        ) -> Result<Vec<RawResult>, ProviderError> {
            for (needle, results) in &self.routes {
                if query.contains(needle) {
                    return Ok(results.clone());
                }
            }
            Err(ProviderError::Api {
                status: 429,
                message: "rate limited".to_string(),
            })
        }
    }

    fn queries(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_partial_failure_is_tolerated() {
        // 3 failing queries, 2 succeeding with 4 unique URLs total.
        let provider = ScriptedSearch {
            routes: vec![
                ("alpha", vec![raw("https://a/1"), raw("https://a/2")]),
                ("beta", vec![raw("https://b/1"), raw("https://b/2")]),
            ],
        };
        let results = collect_results(
            &provider,
            &queries(&["alpha", "beta", "gamma", "delta", "epsilon"]),
            8,
        )
        .await;
        assert_eq!(results.len(), 4);
    }

    #[tokio::test]
    async fn test_duplicate_urls_collapse_to_one() {
        let provider = ScriptedSearch {
            routes: vec![
                ("alpha", vec![raw("https://shared/job"), raw("https://a/1")]),
                ("beta", vec![raw("https://shared/job")]),
            ],
        };
        let results = collect_results(&provider, &queries(&["alpha", "beta"]), 8).await;
        assert_eq!(results.len(), 2);
        let shared: Vec<_> = results
            .iter()
            .filter(|r| r.url == "https://shared/job")
            .collect();
        assert_eq!(shared.len(), 1);
    }

    #[tokio::test]
    async fn test_all_queries_failing_yields_empty() {
        let provider = ScriptedSearch { routes: vec![] };
        let results = collect_results(&provider, &queries(&["x", "y", "z"]), 8).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_output_urls_are_pairwise_distinct() {
        let provider = ScriptedSearch {
            routes: vec![
                ("alpha", vec![raw("https://a/1"), raw("https://a/1"), raw("https://a/2")]),
                ("beta", vec![raw("https://a/2"), raw("https://b/1")]),
            ],
        };
        let results = collect_results(&provider, &queries(&["alpha", "beta"]), 8).await;
        let mut urls: Vec<_> = results.iter().map(|r| r.url.clone()).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), results.len());
    }
}
