//! Sentinel domain value objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of artifact submitted for analysis. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanType {
    JavaCode,
    #[serde(rename = "OPENAPI")]
    OpenApi,
    SmartContract,
    BugAnalysis,
}

impl ScanType {
    pub const ALL: [ScanType; 4] = [
        Self::JavaCode,
        Self::OpenApi,
        Self::SmartContract,
        Self::BugAnalysis,
    ];
}

impl std::fmt::Display for ScanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JavaCode => write!(f, "JAVA_CODE"),
            Self::OpenApi => write!(f, "OPENAPI"),
            Self::SmartContract => write!(f, "SMART_CONTRACT"),
            Self::BugAnalysis => write!(f, "BUG_ANALYSIS"),
        }
    }
}

/// Analysis mode requested by the caller.
///
/// Ignored for [`ScanType::SmartContract`]; see [`AnalysisProfile::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanMode {
    #[default]
    Audit,
    Forge,
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Audit => write!(f, "AUDIT"),
            Self::Forge => write!(f, "FORGE"),
        }
    }
}

/// The analysis profile actually executed for a `(ScanType, ScanMode)` pair.
///
/// Smart-contract scans always run the Web3 profile regardless of the mode
/// the caller supplied; this function is the single place where that override
/// lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisProfile {
    Audit,
    Forge,
    Web3,
}

impl AnalysisProfile {
    /// Resolve the effective profile for a scan request.
    pub fn resolve(scan_type: ScanType, mode: ScanMode) -> Self {
        match (scan_type, mode) {
            (ScanType::SmartContract, _) => Self::Web3,
            (_, ScanMode::Audit) => Self::Audit,
            (_, ScanMode::Forge) => Self::Forge,
        }
    }

    /// Whether the caller's requested mode was overridden during resolution.
    pub fn overrides_mode(scan_type: ScanType, mode: ScanMode) -> bool {
        scan_type == ScanType::SmartContract && mode == ScanMode::Forge
    }
}

/// Finding severity, ordered by emphasis: `Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Scan job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Job is created and waiting for dispatch
    Pending,
    /// Analysis call is in flight
    Running,
    /// Job finished with a normalized report
    Completed,
    /// Job finished with an error
    Failed,
}

impl JobStatus {
    /// Returns the set of valid target states from the current state.
    ///
    /// ```text
    /// Pending ──► Running ──► Completed
    ///                │
    ///                └──► Failed
    /// ```
    pub fn valid_transitions(&self) -> &[JobStatus] {
        match self {
            Self::Pending => &[Self::Running],
            Self::Running => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `target` is allowed from the current state.
    pub fn can_transition_to(&self, target: &JobStatus) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Whether this status represents a terminal (final) state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Running => write!(f, "RUNNING"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Recorded state transition for a scan job (audit trail).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTransition {
    pub from: JobStatus,
    pub to: JobStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Human-readable reason or context for the transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Error returned when an invalid status transition is attempted.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid job transition from {from} to {to}")]
pub struct JobTransitionError {
    pub from: JobStatus,
    pub to: JobStatus,
}
