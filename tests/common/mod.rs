//! Shared test helpers for sentinel integration tests

pub mod fixtures;

use async_trait::async_trait;
use sentinel::infrastructure::analysis::{AnalysisBackend, AnalysisError, AnalysisRequest};

/// Analysis backend stub returning a canned response (or failure) without
/// any network traffic.
pub struct StubBackend {
    response: Result<String, String>,
}

impl StubBackend {
    pub fn returning(document: serde_json::Value) -> Self {
        Self {
            response: Ok(document.to_string()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
        }
    }
}

#[async_trait]
impl AnalysisBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn analyze(&self, _request: AnalysisRequest) -> Result<String, AnalysisError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(AnalysisError::Network(message.clone())),
        }
    }
}
