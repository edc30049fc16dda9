// crates/jobs/src/tracker.rs
//! Central tracker that owns every job record and schedules the work.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde_json::Value;
use tokio::sync::broadcast;
use tracing::info;

use crate::error::JobError;
use crate::state::JobState;
use crate::types::{JobId, JobRecord};

/// Pacing policy for the built-in simulated worker.
///
/// The defaults model a long-running task whose progress is observable
/// mid-flight: ten increments of ten percentage points, two seconds apart.
#[derive(Debug, Clone, Copy)]
pub struct WorkPolicy {
    pub steps: u32,
    pub step_delay: Duration,
}

impl Default for WorkPolicy {
    fn default() -> Self {
        Self {
            steps: 10,
            step_delay: Duration::from_secs(2),
        }
    }
}

/// Central tracker for background jobs.
///
/// Thread-safe behind `Arc`. `submit` schedules the work and returns
/// immediately; the spawned worker is the only writer of its record, while
/// any number of pollers read snapshots concurrently. Records are never
/// removed.
pub struct JobTracker {
    jobs: RwLock<HashMap<JobId, Arc<JobState>>>,
    global_tx: broadcast::Sender<JobRecord>,
    policy: WorkPolicy,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::with_policy(WorkPolicy::default())
    }

    pub fn with_policy(policy: WorkPolicy) -> Self {
        let (global_tx, _) = broadcast::channel(256);
        Self {
            jobs: RwLock::new(HashMap::new()),
            global_tx,
            policy,
        }
    }

    /// Submit a payload for simulated background processing.
    ///
    /// Allocates a fresh id, records the job as started and schedules the
    /// work on its own task. Never waits on the work itself.
    pub fn submit(&self, payload: Value) -> JobId {
        let policy = self.policy;
        self.submit_with(move |state| heavy_computation(state, payload, policy))
    }

    /// Submit with a caller-provided worker.
    ///
    /// The worker receives the job's state for progress reporting; its `Ok`
    /// result completes the record, its `Err` fails it with the diagnostic.
    pub fn submit_with<F, Fut>(&self, worker: F) -> JobId
    where
        F: FnOnce(Arc<JobState>) -> Fut,
        Fut: Future<Output = Result<String, String>> + Send + 'static,
    {
        let id = JobId::new();
        let state = Arc::new(JobState::new(id));
        match self.jobs.write() {
            Ok(mut jobs) => {
                jobs.insert(id, Arc::clone(&state));
            }
            Err(poisoned) => {
                tracing::error!(job_id = %id, "jobs map lock poisoned, inserting anyway");
                poisoned.into_inner().insert(id, Arc::clone(&state));
            }
        }

        // Forward this job's updates to the global feed.
        let global_tx = self.global_tx.clone();
        let feed = Arc::clone(&state);
        tokio::spawn(async move {
            let mut rx = feed.subscribe();
            while let Ok(record) = rx.recv().await {
                let _ = global_tx.send(record);
            }
        });

        info!(job_id = %id, "job submitted");
        let work = worker(Arc::clone(&state));
        tokio::spawn(async move {
            match work.await {
                Ok(result) => state.complete(result),
                Err(diagnostic) => {
                    tracing::warn!(job_id = %id, diagnostic = %diagnostic, "job failed");
                    state.fail(diagnostic);
                }
            }
        });

        id
    }

    /// Get the current snapshot of one job.
    pub fn get_status(&self, id: &JobId) -> Result<JobRecord, JobError> {
        self.read_jobs()
            .get(id)
            .map(|state| state.snapshot())
            .ok_or(JobError::NotFound { id: *id })
    }

    /// Snapshot every known job. No pagination; stale records persist until
    /// process exit.
    pub fn list_all(&self) -> HashMap<JobId, JobRecord> {
        self.read_jobs()
            .iter()
            .map(|(id, state)| (*id, state.snapshot()))
            .collect()
    }

    /// Subscribe to progress updates across all jobs.
    pub fn subscribe(&self) -> broadcast::Receiver<JobRecord> {
        self.global_tx.subscribe()
    }

    fn read_jobs(&self) -> std::sync::RwLockReadGuard<'_, HashMap<JobId, Arc<JobState>>> {
        match self.jobs.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("jobs map lock poisoned, reading anyway");
                poisoned.into_inner()
            }
        }
    }
}

impl Default for JobTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulated long-running computation: paced steps that each advance
/// progress by an equal share, then a result derived from the payload's
/// `items` array.
async fn heavy_computation(
    state: Arc<JobState>,
    payload: Value,
    policy: WorkPolicy,
) -> Result<String, String> {
    let steps = policy.steps.max(1);
    for i in 0..steps {
        tokio::time::sleep(policy.step_delay).await;
        let progress = ((u64::from(i) + 1) * 100 / u64::from(steps)) as u8;
        state.set_processing(progress, format!("Processing step {}/{steps}", i + 1));
    }

    let item_count = payload
        .get("items")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    Ok(format!("Processed {item_count} items"))
}
