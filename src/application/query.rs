//! Query/filter engine for the job list view.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::entities::ScanJob;
use crate::domain::value_objects::{JobStatus, ScanType};

/// Optional job list filters; AND semantics across supplied fields.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct JobFilter {
    /// Keep only jobs of this scan type.
    #[serde(rename = "type")]
    pub scan_type: Option<ScanType>,
    /// Keep only jobs in this status.
    pub status: Option<JobStatus>,
}

impl JobFilter {
    pub fn matches(&self, job: &ScanJob) -> bool {
        self.scan_type.is_none_or(|t| job.scan_type == t)
            && self.status.is_none_or(|s| job.status == s)
    }
}

/// Filter a most-recent-first job list, preserving its ordering.
///
/// No filter fields means all jobs.
pub fn filter_jobs(jobs: Vec<ScanJob>, filter: &JobFilter) -> Vec<ScanJob> {
    jobs.into_iter().filter(|job| filter.matches(job)).collect()
}
