use std::sync::Arc;

use crate::models::profile::Profile;
use crate::pipeline::Pipeline;
use crate::usage::InMemoryUsageRecorder;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    /// Candidate profile, shared read-only with the pipeline.
    pub profile: Arc<Profile>,
    pub pipeline: Arc<Pipeline>,
    /// Concrete recorder so the usage report route can snapshot it. The
    /// pipeline only sees the `UsageRecorder` capability.
    pub usage: Arc<InMemoryUsageRecorder>,
}
