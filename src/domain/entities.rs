//! Sentinel domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::report::Report;
use super::value_objects::{JobStatus, JobTransition, JobTransitionError, ScanMode, ScanType};

/// One analysis request and its lifecycle from submission to terminal
/// outcome.
///
/// Created in [`JobStatus::Pending`]; moves to `Running` when dispatch
/// begins, then to exactly one terminal state: `Completed` (report set,
/// error empty) or `Failed` (error set, report empty). Terminal jobs are
/// immutable and retained until externally purged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanJob {
    pub id: Uuid,
    pub target_name: String,
    pub scan_type: ScanType,
    pub mode: ScanMode,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub report: Option<Report>,
    pub error: Option<String>,
    /// Audit trail of every status change.
    #[serde(default)]
    pub transitions: Vec<JobTransition>,
}

impl ScanJob {
    pub fn new(target_name: String, scan_type: ScanType, mode: ScanMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_name,
            scan_type,
            mode,
            status: JobStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            report: None,
            error: None,
            transitions: Vec::new(),
        }
    }

    /// Move the job to `target`, recording an audit-trail entry.
    ///
    /// Validates the change against the state machine on [`JobStatus`];
    /// transitions out of a terminal state fail with
    /// [`JobTransitionError`]. Timestamps are maintained here so every
    /// caller goes through the same guard.
    pub fn transition(
        &mut self,
        target: JobStatus,
        reason: Option<String>,
    ) -> Result<(), JobTransitionError> {
        if !self.status.can_transition_to(&target) {
            return Err(JobTransitionError {
                from: self.status,
                to: target,
            });
        }

        let now = Utc::now();
        match target {
            JobStatus::Running => self.started_at = Some(now),
            JobStatus::Completed | JobStatus::Failed => self.completed_at = Some(now),
            JobStatus::Pending => {}
        }

        self.transitions.push(JobTransition {
            from: self.status,
            to: target,
            timestamp: now,
            reason,
        });
        self.status = target;
        Ok(())
    }
}
