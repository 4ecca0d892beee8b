//! Candidate profile: the fixed description every posting is scored against.

use serde::{Deserialize, Serialize};

/// Immutable candidate profile. Loaded once at startup, shared read-only
/// across pipeline runs, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Skills in priority order. Matching is case-insensitive substring.
    pub skills: Vec<String>,
    pub target_roles: Vec<String>,
    pub graduation_year: u16,
    /// Minimum acceptable stipend, INR per month.
    pub minimum_stipend: u32,
    pub preferred_locations: Vec<String>,
    pub must_have_keywords: Vec<String>,
    pub avoid_keywords: Vec<String>,
}

impl Profile {
    /// The built-in candidate this deployment matches against.
    pub fn default_candidate() -> Self {
        Self {
            skills: vec![
                "Python".to_string(),
                "JavaScript".to_string(),
                "TypeScript".to_string(),
                "C++".to_string(),
                "React".to_string(),
                "Node.js".to_string(),
                "SQL".to_string(),
                "Docker".to_string(),
                "Kubernetes".to_string(),
                "AWS".to_string(),
            ],
            target_roles: vec![
                "Software Development Engineer".to_string(),
                "SDE Intern".to_string(),
                "Backend Engineer".to_string(),
                "Full Stack Engineer".to_string(),
                "ML Engineer".to_string(),
            ],
            graduation_year: 2026,
            minimum_stipend: 50_000,
            preferred_locations: vec![
                "Remote".to_string(),
                "Bangalore".to_string(),
                "Hyderabad".to_string(),
                "Pune".to_string(),
                "Delhi NCR".to_string(),
            ],
            must_have_keywords: vec![
                "2026 passout".to_string(),
                "SDE".to_string(),
                "full-time".to_string(),
                "PPO".to_string(),
                "placement".to_string(),
            ],
            avoid_keywords: vec![
                "contract".to_string(),
                "part-time".to_string(),
                "freelance".to_string(),
            ],
        }
    }

    /// Compact rendering used inside reasoning-model prompts.
    pub fn prompt_summary(&self) -> String {
        format!(
            "Skills: {}\n\
             Target roles: {}\n\
             Graduation year: {}\n\
             Minimum stipend: INR {}/month\n\
             Preferred locations: {}\n\
             Must-have keywords: {}\n\
             Avoid: {}",
            self.skills.join(", "),
            self.target_roles.join(", "),
            self.graduation_year,
            self.minimum_stipend,
            self.preferred_locations.join(", "),
            self.must_have_keywords.join(", "),
            self.avoid_keywords.join(", "),
        )
    }
}
