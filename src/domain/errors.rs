//! Scan error taxonomy.

use uuid::Uuid;

use super::value_objects::JobTransitionError;

/// Errors surfaced by the scan pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Programmer or deployment error (e.g. missing API key). Fatal; never
    /// expected at runtime once configuration is validated.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure, timeout, or unparseable backend output. A caller
    /// may retry by submitting a fresh job; the pipeline itself never
    /// retries, since identical prompts carry no idempotence guarantee.
    #[error("Analysis backend unavailable: {0}")]
    AnalysisUnavailable(String),

    /// The backend returned a document that parses as JSON but violates the
    /// schema contract. Surfaced as a failed job naming the first violated
    /// field; not retried, since the same malformed shape is likely to recur.
    #[error("Schema violation: missing or invalid field '{field}'")]
    SchemaViolation { field: String },

    /// A status transition lost a race or targeted a terminal job. Callers
    /// should re-read the job instead of retrying the transition.
    #[error(transparent)]
    InvalidTransition(#[from] JobTransitionError),

    #[error("Job not found: {0}")]
    NotFound(Uuid),
}

impl ScanError {
    pub fn schema_violation(field: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
        }
    }

    /// Whether submitting a brand-new job with the same input could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AnalysisUnavailable(_))
    }
}
