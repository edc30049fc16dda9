// crates/jobs/src/error.rs
use thiserror::Error;

use crate::types::JobId;

/// Errors surfaced to job pollers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobError {
    #[error("Job not found: {id}")]
    NotFound { id: JobId },
}
