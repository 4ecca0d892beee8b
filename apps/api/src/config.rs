use anyhow::{Context, Result};

/// Pipeline policy knobs. Thresholds, cutoffs, and caps are deployment
/// policy, not structural invariants, so they live here rather than as
/// literals in the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on diversified queries per run.
    pub max_queries: usize,
    pub max_results_per_query: u32,
    /// Cap on postings carried into the scoring stage per run.
    pub max_postings: usize,
    /// Minimum score a posting needs to appear in any output bucket.
    pub admission_threshold: u32,
    pub high_score_cutoff: u32,
    pub medium_score_cutoff: u32,
    pub high_cap: usize,
    pub medium_cap: usize,
    pub low_cap: usize,
    /// Bounded worker-pool size for concurrent posting scoring.
    pub scorer_concurrency: usize,
    /// When false the reasoning-model scorer is skipped entirely and every
    /// posting goes through the deterministic rule scorer.
    pub model_scoring_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_queries: 5,
            max_results_per_query: 8,
            max_postings: 15,
            admission_threshold: 40,
            high_score_cutoff: 70,
            medium_score_cutoff: 40,
            high_cap: 10,
            medium_cap: 5,
            low_cap: 3,
            scorer_concurrency: 8,
            model_scoring_enabled: true,
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub tavily_api_key: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub pipeline: PipelineConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut pipeline = PipelineConfig::default();
        if let Ok(value) = std::env::var("JOBSCOUT_ADMISSION_THRESHOLD") {
            pipeline.admission_threshold = value
                .parse()
                .context("JOBSCOUT_ADMISSION_THRESHOLD must be an integer")?;
        }
        if let Ok(value) = std::env::var("JOBSCOUT_SCORER_CONCURRENCY") {
            pipeline.scorer_concurrency = value
                .parse()
                .context("JOBSCOUT_SCORER_CONCURRENCY must be an integer")?;
        }
        if let Ok(value) = std::env::var("JOBSCOUT_MODEL_SCORING") {
            pipeline.model_scoring_enabled = value
                .parse()
                .context("JOBSCOUT_MODEL_SCORING must be true or false")?;
        }

        Ok(Config {
            tavily_api_key: require_env("TAVILY_API_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            pipeline,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_policy() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_queries, 5);
        assert_eq!(config.max_results_per_query, 8);
        assert_eq!(config.admission_threshold, 40);
        assert_eq!(config.high_score_cutoff, 70);
        assert_eq!(config.medium_score_cutoff, 40);
        assert_eq!(config.high_cap, 10);
        assert_eq!(config.medium_cap, 5);
        assert_eq!(config.low_cap, 3);
        assert!(config.scorer_concurrency >= 1);
        assert!(config.model_scoring_enabled);
    }
}
