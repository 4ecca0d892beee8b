// Prompt constants for the two reasoning-model call sites.

/// System prompt for query expansion. Enforces JSON-only output.
pub const QUERY_EXPANSION_SYSTEM: &str =
    "You are an expert technical recruiter optimizing job-board search queries. \
    You MUST respond with valid JSON only - a JSON array of strings. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations.";

/// Query expansion template. Replace `{base_query}`, `{skills}`,
/// `{graduation_year}` before sending.
pub const QUERY_EXPANSION_PROMPT_TEMPLATE: &str = r#"Generate 5 different job search queries for finding SDE/Software Engineer internships for {graduation_year} passouts in India.

Base query: "{base_query}"
Candidate skills: {skills}

Diversify platform coverage: scope some queries to specific job boards (linkedin.com/jobs, naukri.com, instahyre.com, wellfound.com) and keep at least one open web query.

Return ONLY a JSON array of search strings, no explanation:
["query1", "query2", "query3", "query4", "query5"]"#;

/// System prompt for posting analysis. Enforces JSON-only output.
pub const POSTING_ANALYSIS_SYSTEM: &str =
    "You are an expert career advisor analyzing job postings for a specific candidate. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Posting analysis template. Replace `{title}`, `{content}`,
/// `{profile_summary}` before sending.
pub const POSTING_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this job posting for the candidate below.

Job title: {title}
Job content: {content}

Candidate profile:
{profile_summary}

Return a JSON object with this EXACT schema (no extra fields):
{
  "match_score": 75,
  "matched_skills": ["skill1", "skill2"],
  "relevance_factors": ["factor1", "factor2"]
}

Rules:
- match_score is an integer from 0 to 100.
- matched_skills lists at most 5 skills the candidate has that the posting asks for.
- relevance_factors briefly names what makes the posting a good or bad fit
  (cohort eligibility, conversion/PPO prospects, compensation, stack overlap)."#;
