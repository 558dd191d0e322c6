//! Scan workflow: centralised lifecycle controller for scan jobs.
//!
//! Every status change goes through the job store's guarded `transition`,
//! so the state machine and the terminal-state invariant are enforced in
//! one place. Each scan runs as an independent unit of work:
//!
//! ```text
//! Client            ScanWorkflow          JobStore        Backend
//!   │                    │                    │              │
//!   ├─ start_scan() ────►│── create ─────────►│              │
//!   │◄── job id ─────────┤                    │              │
//!   │                    │   (spawned task)   │              │
//!   │                    ├── Started ────────►│              │
//!   │                    ├── dispatch ─────────────────────► │
//!   │                    │◄── raw document ──────────────────┤
//!   │                    ├── normalize        │              │
//!   │                    ├── Completed/Failed►│              │
//! ```
//!
//! There is no cancellation once dispatch has begun; a client may only
//! ignore a pending result.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::application::normalizer::normalize;
use crate::domain::errors::ScanError;
use crate::domain::value_objects::{AnalysisProfile, ScanMode, ScanType};
use crate::infrastructure::analysis::AnalysisDispatcher;
use crate::infrastructure::job_store::{JobStore, JobStoreError, StatusChange};

/// Job lifecycle controller; clones share the same store and dispatcher.
#[derive(Clone)]
pub struct ScanWorkflow {
    store: Arc<dyn JobStore>,
    dispatcher: AnalysisDispatcher,
}

impl ScanWorkflow {
    pub fn new(store: Arc<dyn JobStore>, dispatcher: AnalysisDispatcher) -> Self {
        Self { store, dispatcher }
    }

    /// Create a Pending job and kick off its analysis in the background.
    ///
    /// Returns as soon as the job exists; callers poll the store for the
    /// terminal outcome.
    pub async fn start_scan(
        &self,
        target_name: String,
        content: String,
        scan_type: ScanType,
        mode: ScanMode,
    ) -> Result<Uuid, JobStoreError> {
        if AnalysisProfile::overrides_mode(scan_type, mode) {
            // The caller's mode is silently coerced, matching the original
            // product behavior; operators still get a trace of it.
            warn!(
                scan_type = %scan_type,
                requested_mode = %mode,
                "Smart-contract scan forces the Web3 profile; requested mode ignored"
            );
        }

        let job = self
            .store
            .create(target_name, scan_type, mode)
            .await?;

        info!(job_id = %job.id, scan_type = %scan_type, mode = %mode, "Scan job created");

        let workflow = self.clone();
        let job_id = job.id;
        tokio::spawn(async move {
            workflow.run_scan(job_id, content, scan_type, mode).await;
        });

        Ok(job_id)
    }

    /// The unit of work for one job: Running → dispatch → normalize →
    /// terminal state.
    async fn run_scan(&self, job_id: Uuid, content: String, scan_type: ScanType, mode: ScanMode) {
        if let Err(e) = self.store.transition(job_id, StatusChange::Started).await {
            // Lost a race or the job vanished; someone else owns the outcome.
            warn!(job_id = %job_id, error = %e, "Could not start job; skipping");
            return;
        }

        let outcome = match self.dispatcher.dispatch(&content, scan_type, mode).await {
            Ok(raw) => normalize(&raw, scan_type, mode),
            Err(e) => Err(e),
        };

        let change = match outcome {
            Ok(report) => {
                info!(job_id = %job_id, risk_score = report.risk_score, "Scan completed");
                StatusChange::Completed(report)
            }
            Err(e) => {
                warn!(job_id = %job_id, error = %e, "Scan failed");
                StatusChange::Failed(e.to_string())
            }
        };

        if let Err(e) = self.store.transition(job_id, change).await {
            warn!(job_id = %job_id, error = %e, "Job already resolved; dropping result");
        }
    }

    /// Retrieve a job by id (delegates to the store).
    pub async fn get_job(
        &self,
        job_id: Uuid,
    ) -> Result<crate::domain::entities::ScanJob, ScanError> {
        self.store.get(job_id).await.map_err(ScanError::from)
    }
}
