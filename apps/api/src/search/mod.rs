//! Search provider boundary. Executes one query and returns raw result
//! records; Tavily is the shipped implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::posting::RawResult;

const TAVILY_API_URL: &str = "https://api.tavily.com/search";

/// Failure of the search backend (network, quota, malformed body). Always
/// recovered locally: the failing query contributes zero results.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// External search capability. One call executes one query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: u32)
        -> Result<Vec<RawResult>, ProviderError>;
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: u32,
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

/// Tavily search API client.
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
}

impl TavilyClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<RawResult>, ProviderError> {
        let response = self
            .client
            .post(TAVILY_API_URL)
            .bearer_auth(&self.api_key)
            .json(&TavilyRequest {
                query,
                max_results,
                include_answer: false,
                include_raw_content: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TavilyResponse = response.json().await?;
        debug!("search returned {} results for {query:?}", body.results.len());

        Ok(body
            .results
            .into_iter()
            .map(|r| RawResult {
                title: r.title,
                url: r.url,
                content: r.content,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_tolerates_missing_fields() {
        let body: TavilyResponse =
            serde_json::from_str(r#"{"results": [{"url": "https://example.com/a"}]}"#).unwrap();
        assert_eq!(body.results.len(), 1);
        assert_eq!(body.results[0].url, "https://example.com/a");
        assert!(body.results[0].title.is_empty());
    }

    #[test]
    fn test_response_tolerates_missing_results_key() {
        let body: TavilyResponse = serde_json::from_str(r#"{"answer": null}"#).unwrap();
        assert!(body.results.is_empty());
    }
}
