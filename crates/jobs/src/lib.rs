// crates/jobs/src/lib.rs
//! Background job system for long-running async work.
//!
//! Provides:
//! - `JobTracker` — central manager for submitting and tracking jobs
//! - `JobState` — per-job record with consistent snapshots
//! - `JobRecord` — wire-ready progress snapshots
//!
//! Submitting never blocks on the work: the worker runs on its own task and
//! updates its record as it goes, while any number of pollers read
//! snapshots or subscribe to pushed updates concurrently. Records are kept
//! for the life of the process; there is no cancellation and no cleanup.

pub mod error;
pub mod state;
pub mod tracker;
pub mod types;

pub use error::JobError;
pub use state::JobState;
pub use tracker::{JobTracker, WorkPolicy};
pub use types::{JobId, JobRecord, JobStatus};
