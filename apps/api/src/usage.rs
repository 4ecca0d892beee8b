//! Usage recording. The pipeline only holds the `record` capability; where
//! the entries go (memory, metrics, a billing sink) is the caller's choice.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Which external service a usage entry is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Search,
    Reasoning,
}

/// One recorded unit of external API usage.
#[derive(Debug, Clone, Serialize)]
pub struct UsageEntry {
    pub run_id: Uuid,
    pub service: Service,
    pub operation: &'static str,
    pub requests: u32,
    pub recorded_at: DateTime<Utc>,
}

impl UsageEntry {
    pub fn new(run_id: Uuid, service: Service, operation: &'static str) -> Self {
        Self {
            run_id,
            service,
            operation,
            requests: 1,
            recorded_at: Utc::now(),
        }
    }
}

/// Capability to record external API usage. Owned by the caller and injected
/// into the pipeline.
pub trait UsageRecorder: Send + Sync {
    fn record(&self, entry: UsageEntry);
}

/// Default recorder: an in-memory log with a snapshot accessor.
#[derive(Default)]
pub struct InMemoryUsageRecorder {
    entries: Mutex<Vec<UsageEntry>>,
}

impl InMemoryUsageRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<UsageEntry> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl UsageRecorder for InMemoryUsageRecorder {
    fn record(&self, entry: UsageEntry) {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_entries_in_order() {
        let recorder = InMemoryUsageRecorder::new();
        let run_id = Uuid::new_v4();
        recorder.record(UsageEntry::new(run_id, Service::Reasoning, "expand_queries"));
        recorder.record(UsageEntry {
            requests: 5,
            ..UsageEntry::new(run_id, Service::Search, "search")
        });

        let entries = recorder.snapshot();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, "expand_queries");
        assert_eq!(entries[1].service, Service::Search);
        assert_eq!(entries[1].requests, 5);
    }
}
