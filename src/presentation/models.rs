//! API request/response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::entities::ScanJob;
use crate::domain::report::{Report, RiskBand, SeverityHistogram};
use crate::domain::value_objects::{JobStatus, ScanMode, ScanType};

/// POST /api/scans request body
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StartScanRequest {
    /// Display name for the scan target
    pub name: String,
    /// The artifact to analyze: source code, API spec, contract, or bug report
    pub content: String,
    #[serde(rename = "type")]
    pub scan_type: ScanType,
    /// Defaults to AUDIT; ignored for SMART_CONTRACT targets
    #[serde(default)]
    pub mode: ScanMode,
}

/// Accepted-scan response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartScanResponse {
    pub job_id: Uuid,
}

/// List-view job projection: no report body
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummaryDto {
    pub job_id: Uuid,
    pub target_name: String,
    #[serde(rename = "type")]
    pub scan_type: ScanType,
    pub mode: ScanMode,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ScanJob> for ScanSummaryDto {
    fn from(job: &ScanJob) -> Self {
        Self {
            job_id: job.id,
            target_name: job.target_name.clone(),
            scan_type: job.scan_type,
            mode: job.mode,
            status: job.status,
            created_at: job.created_at,
            risk_score: job.report.as_ref().map(|r| r.risk_score),
            error: job.error.clone(),
        }
    }
}

/// Scan list response
#[derive(Debug, Serialize, ToSchema)]
pub struct ScanListResponse {
    pub scans: Vec<ScanSummaryDto>,
    pub total: usize,
}

/// Full job projection, including the report and its derived views
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanDetailDto {
    pub job_id: Uuid,
    pub target_name: String,
    #[serde(rename = "type")]
    pub scan_type: ScanType,
    pub mode: ScanMode,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    /// Severity counts derived from the report's findings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_histogram: Option<SeverityHistogram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_band: Option<RiskBand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ScanJob> for ScanDetailDto {
    fn from(job: ScanJob) -> Self {
        let severity_histogram = job.report.as_ref().map(Report::severity_histogram);
        let risk_band = job.report.as_ref().map(Report::risk_band);
        Self {
            job_id: job.id,
            target_name: job.target_name,
            scan_type: job.scan_type,
            mode: job.mode,
            status: job.status,
            created_at: job.created_at,
            started_at: job.started_at,
            completed_at: job.completed_at,
            report: job.report,
            severity_histogram,
            risk_band,
            error: job.error,
        }
    }
}

/// Health probe response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
