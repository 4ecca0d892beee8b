//! Query planning: expands one search intent into a bounded, diversified
//! set of provider queries.

use tracing::warn;

use crate::llm_client::prompts::{QUERY_EXPANSION_PROMPT_TEMPLATE, QUERY_EXPANSION_SYSTEM};
use crate::llm_client::{parse_json_payload, ModelError, ReasoningClient};
use crate::models::profile::Profile;

/// Expands `base_query` into at most `max_queries` provider queries.
///
/// Primary strategy asks the reasoning model for tailored variants. Any
/// failure (call error, malformed output, empty list) falls back to the
/// deterministic platform templates; planning itself never fails.
pub async fn plan_queries(
    base_query: &str,
    profile: &Profile,
    llm: &dyn ReasoningClient,
    max_queries: usize,
) -> Vec<String> {
    let mut queries = match expand_with_model(base_query, profile, llm).await {
        Ok(queries) if !queries.is_empty() => queries,
        Ok(_) => {
            warn!("query expansion returned an empty list, using fallback templates");
            fallback_queries(base_query, profile)
        }
        Err(e) => {
            warn!("query expansion failed ({e}), using fallback templates");
            fallback_queries(base_query, profile)
        }
    };
    queries.truncate(max_queries);
    queries
}

async fn expand_with_model(
    base_query: &str,
    profile: &Profile,
    llm: &dyn ReasoningClient,
) -> Result<Vec<String>, ModelError> {
    let prompt = QUERY_EXPANSION_PROMPT_TEMPLATE
        .replace("{base_query}", base_query)
        .replace("{skills}", &profile.skills.join(", "))
        .replace("{graduation_year}", &profile.graduation_year.to_string());
    let text = llm.complete(&prompt, QUERY_EXPANSION_SYSTEM).await?;
    parse_json_payload::<Vec<String>>(&text)
}

/// Deterministic template set: identical `(base_query, profile)` inputs
/// always produce identical queries.
pub fn fallback_queries(base_query: &str, profile: &Profile) -> Vec<String> {
    let year = profile.graduation_year;
    vec![
        format!("site:linkedin.com/jobs {base_query} {year} passout intern OR SDE"),
        format!("site:naukri.com {base_query} {year} graduate fresher"),
        format!("site:instahyre.com {base_query} {year} batch"),
        format!("site:wellfound.com {base_query} internship {year}"),
        format!("{base_query} internship {year} passout stipend PPO India"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct CannedClient(&'static str);

    #[async_trait]
    impl ReasoningClient for CannedClient {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl ReasoningClient for FailingClient {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, ModelError> {
            Err(ModelError::EmptyContent)
        }
    }

    #[test]
    fn test_fallback_queries_are_deterministic() {
        let profile = Profile::default_candidate();
        let first = fallback_queries("SDE Intern", &profile);
        let second = fallback_queries("SDE Intern", &profile);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_fallback_queries_cover_platforms() {
        let profile = Profile::default_candidate();
        let queries = fallback_queries("backend developer", &profile);
        assert!(queries.iter().any(|q| q.contains("linkedin.com")));
        assert!(queries.iter().any(|q| q.contains("naukri.com")));
        assert!(queries.iter().any(|q| q.contains("instahyre.com")));
        assert!(queries.iter().any(|q| q.contains("wellfound.com")));
        assert!(queries.iter().all(|q| q.contains("backend developer")));
        assert!(queries.iter().all(|q| q.contains("2026")));
    }

    #[tokio::test]
    async fn test_model_queries_used_when_valid() {
        let client = CannedClient(r#"["q1", "q2", "q3"]"#);
        let profile = Profile::default_candidate();
        let queries = plan_queries("SDE Intern", &profile, &client, 5).await;
        assert_eq!(queries, vec!["q1", "q2", "q3"]);
    }

    #[tokio::test]
    async fn test_model_queries_capped_at_max() {
        let client = CannedClient(r#"["a", "b", "c", "d", "e", "f", "g"]"#);
        let profile = Profile::default_candidate();
        let queries = plan_queries("SDE Intern", &profile, &client, 5).await;
        assert_eq!(queries.len(), 5);
    }

    #[tokio::test]
    async fn test_malformed_model_output_falls_back() {
        let client = CannedClient("sure! here are five queries you could try");
        let profile = Profile::default_candidate();
        let queries = plan_queries("SDE Intern", &profile, &client, 5).await;
        assert_eq!(queries, fallback_queries("SDE Intern", &profile));
    }

    #[tokio::test]
    async fn test_empty_model_output_falls_back() {
        let client = CannedClient("[]");
        let profile = Profile::default_candidate();
        let queries = plan_queries("SDE Intern", &profile, &client, 5).await;
        assert_eq!(queries, fallback_queries("SDE Intern", &profile));
    }

    #[tokio::test]
    async fn test_model_failure_falls_back() {
        let profile = Profile::default_candidate();
        let queries = plan_queries("SDE Intern", &profile, &FailingClient, 5).await;
        assert_eq!(queries, fallback_queries("SDE Intern", &profile));
    }
}
