// crates/jobs/src/types.rs
//! Types for the background job system.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Unique identifier for a submitted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Status of a background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Started,
    Processing,
    Completed,
    Failed,
}

/// Snapshot of one job record, returned to pollers and pushed to progress
/// subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub job_id: JobId,
    pub status: JobStatus,
    /// 0..=100, monotone non-decreasing while the job is processing.
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Present only once the job has completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_ids_are_unique() {
        let a = JobId::new();
        let b = JobId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn record_serializes_camel_case_and_skips_empty_fields() {
        let record = JobRecord {
            job_id: JobId::new(),
            status: JobStatus::Processing,
            progress: 40,
            message: Some("Processing step 4/10".to_string()),
            result: None,
            updated_at: "2026-08-05T12:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"jobId\""));
        assert!(json.contains("\"status\":\"processing\""));
        assert!(json.contains("\"progress\":40"));
        assert!(json.contains("\"updatedAt\""));
        assert!(!json.contains("result"));
    }
}
