//! Job storage: key-value store of scan jobs with guarded transitions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::query::{JobFilter, filter_jobs};
use crate::domain::entities::ScanJob;
use crate::domain::errors::ScanError;
use crate::domain::report::Report;
use crate::domain::value_objects::{JobStatus, JobTransitionError, ScanMode, ScanType};

/// Job persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum JobStoreError {
    #[error("Job not found: {0}")]
    NotFound(Uuid),
    #[error(transparent)]
    InvalidTransition(#[from] JobTransitionError),
}

impl From<JobStoreError> for ScanError {
    fn from(err: JobStoreError) -> Self {
        match err {
            JobStoreError::NotFound(id) => ScanError::NotFound(id),
            JobStoreError::InvalidTransition(e) => ScanError::InvalidTransition(e),
        }
    }
}

/// A requested status change together with its payload.
///
/// Completion requires a report and failure requires an error string; the
/// variants make a payload-less terminal transition unrepresentable.
#[derive(Debug, Clone)]
pub enum StatusChange {
    Started,
    Completed(Report),
    Failed(String),
}

impl StatusChange {
    pub fn target(&self) -> JobStatus {
        match self {
            Self::Started => JobStatus::Running,
            Self::Completed(_) => JobStatus::Completed,
            Self::Failed(_) => JobStatus::Failed,
        }
    }

    fn reason(&self) -> String {
        match self {
            Self::Started => "Dispatch started".to_string(),
            Self::Completed(report) => {
                format!("Completed with {} findings", report.severities().count())
            }
            Self::Failed(error) => format!("Execution failed: {}", error),
        }
    }
}

/// Job storage interface.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Allocate a fresh Pending job. Returns immediately; never blocks on
    /// analysis.
    async fn create(
        &self,
        target_name: String,
        scan_type: ScanType,
        mode: ScanMode,
    ) -> Result<ScanJob, JobStoreError>;

    async fn get(&self, id: Uuid) -> Result<ScanJob, JobStoreError>;

    /// All jobs matching every supplied filter field, most-recently-created
    /// first.
    async fn list(&self, filter: &JobFilter) -> Result<Vec<ScanJob>, JobStoreError>;

    /// Apply a status change atomically for this job id.
    ///
    /// Two transitions racing on one job must not both succeed: exactly one
    /// wins and the other observes `InvalidTransition`.
    async fn transition(&self, id: Uuid, change: StatusChange) -> Result<ScanJob, JobStoreError>;
}

#[derive(Default)]
struct StoreInner {
    jobs: HashMap<Uuid, ScanJob>,
    /// Insertion order, oldest first; `list` walks it in reverse.
    order: Vec<Uuid>,
}

/// In-memory job store.
///
/// All mutation goes through the map's write lock, which serializes
/// transitions per job id; the state-machine check runs under the same lock,
/// so racing transitions are linearizable.
#[derive(Default)]
pub struct InMemoryJobStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(
        &self,
        target_name: String,
        scan_type: ScanType,
        mode: ScanMode,
    ) -> Result<ScanJob, JobStoreError> {
        let job = ScanJob::new(target_name, scan_type, mode);
        let mut inner = self.inner.write().await;
        inner.order.push(job.id);
        inner.jobs.insert(job.id, job.clone());
        tracing::debug!(job_id = %job.id, scan_type = %scan_type, mode = %mode, "Job created");
        Ok(job)
    }

    async fn get(&self, id: Uuid) -> Result<ScanJob, JobStoreError> {
        let inner = self.inner.read().await;
        inner.jobs.get(&id).cloned().ok_or(JobStoreError::NotFound(id))
    }

    async fn list(&self, filter: &JobFilter) -> Result<Vec<ScanJob>, JobStoreError> {
        let inner = self.inner.read().await;
        let jobs: Vec<ScanJob> = inner
            .order
            .iter()
            .rev()
            .filter_map(|id| inner.jobs.get(id).cloned())
            .collect();
        Ok(filter_jobs(jobs, filter))
    }

    async fn transition(&self, id: Uuid, change: StatusChange) -> Result<ScanJob, JobStoreError> {
        let mut inner = self.inner.write().await;
        let job = inner.jobs.get_mut(&id).ok_or(JobStoreError::NotFound(id))?;

        let reason = change.reason();
        job.transition(change.target(), Some(reason))?;
        match change {
            StatusChange::Started => {}
            StatusChange::Completed(report) => job.report = Some(report),
            StatusChange::Failed(error) => job.error = Some(error),
        }

        tracing::info!(job_id = %id, status = %job.status, "Job transitioned");
        Ok(job.clone())
    }
}
