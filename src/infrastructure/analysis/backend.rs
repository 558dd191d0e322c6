//! Analysis backend trait and related types.
//!
//! The backend is an opaque external collaborator: given text, a system
//! instruction, and an output-shape constraint it returns a document. Its
//! reasoning is not reproducible and identical inputs carry no determinism
//! guarantee.

use async_trait::async_trait;
use serde_json::Value;

/// One analysis invocation.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Role/system framing for the analysis.
    pub system_instruction: String,
    /// The prompt carrying the target content.
    pub prompt: String,
    /// Output-shape constraint rendered from the schema contract.
    pub response_schema: Value,
}

/// Backend invocation error.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Backend API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalysisError::Timeout { seconds: 0 }
        } else if err.is_connect() {
            AnalysisError::Network(format!("Connection failed: {}", err))
        } else {
            AnalysisError::Network(err.to_string())
        }
    }
}

/// Core trait for analysis backends.
///
/// Object safe; used with dynamic dispatch via `Arc<dyn AnalysisBackend>`.
/// Implementations make exactly one attempt per call — retries are caller
/// policy, never embedded here.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Backend identifier for logging.
    fn name(&self) -> &'static str;

    /// Run one analysis and return the raw response text.
    async fn analyze(&self, request: AnalysisRequest) -> Result<String, AnalysisError>;
}
