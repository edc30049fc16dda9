// crates/jobs/src/state.rs
//! Shared state tracking for a single background job.

use std::sync::RwLock;

use tokio::sync::broadcast;

use crate::types::{JobId, JobRecord, JobStatus};

struct Inner {
    status: JobStatus,
    progress: u8,
    message: Option<String>,
    result: Option<String>,
}

/// State for a single job.
///
/// The whole record sits behind one `RwLock`, so a poller always observes a
/// consistent status/progress/message set, never a half-applied update.
/// Every mutation publishes a fresh snapshot to this job's progress channel.
pub struct JobState {
    id: JobId,
    inner: RwLock<Inner>,
    progress_tx: broadcast::Sender<JobRecord>,
}

impl JobState {
    pub(crate) fn new(id: JobId) -> Self {
        let (progress_tx, _) = broadcast::channel(64);
        Self {
            id,
            inner: RwLock::new(Inner {
                status: JobStatus::Started,
                progress: 0,
                message: None,
                result: None,
            }),
            progress_tx,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    /// Advance the job. Progress is clamped to 100 and kept monotone: a
    /// value below what is already recorded leaves the recorded value.
    pub fn set_processing(&self, progress: u8, message: impl Into<String>) {
        self.mutate(|inner| {
            inner.status = JobStatus::Processing;
            inner.progress = inner.progress.max(progress.min(100));
            inner.message = Some(message.into());
        });
    }

    /// Mark the job as completed with its result payload. Progress jumps to
    /// 100 and the message becomes the standard success note.
    pub fn complete(&self, result: impl Into<String>) {
        self.mutate(|inner| {
            inner.status = JobStatus::Completed;
            inner.progress = 100;
            inner.message = Some("Task completed successfully".to_string());
            inner.result = Some(result.into());
        });
    }

    /// Mark the job as failed with a diagnostic message.
    pub fn fail(&self, diagnostic: impl Into<String>) {
        self.mutate(|inner| {
            inner.status = JobStatus::Failed;
            inner.message = Some(diagnostic.into());
        });
    }

    /// Subscribe to updates for this specific job.
    pub fn subscribe(&self) -> broadcast::Receiver<JobRecord> {
        self.progress_tx.subscribe()
    }

    /// Get a snapshot of the current record.
    pub fn snapshot(&self) -> JobRecord {
        let inner = match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!(job_id = %self.id, "job record lock poisoned, reading anyway");
                poisoned.into_inner()
            }
        };
        JobRecord {
            job_id: self.id,
            status: inner.status,
            progress: inner.progress,
            message: inner.message.clone(),
            result: inner.result.clone(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn mutate(&self, f: impl FnOnce(&mut Inner)) {
        {
            let mut inner = match self.inner.write() {
                Ok(guard) => guard,
                Err(poisoned) => {
                    tracing::error!(job_id = %self.id, "job record lock poisoned, writing anyway");
                    poisoned.into_inner()
                }
            };
            f(&mut inner);
        }
        // No subscribers is fine.
        let _ = self.progress_tx.send(self.snapshot());
    }
}
