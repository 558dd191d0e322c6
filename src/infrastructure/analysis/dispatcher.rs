//! Analysis dispatch: profile selection, prompt assembly, one backend call.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::backend::{AnalysisBackend, AnalysisError, AnalysisRequest};
use super::prompts::PromptBuilder;
use super::response_parser::parse_document;
use crate::domain::errors::ScanError;
use crate::domain::schema::SchemaRegistry;
use crate::domain::value_objects::{AnalysisProfile, ScanMode, ScanType};

/// Boundary to the opaque analysis service.
///
/// Selects the effective profile, builds the request with the contract as an
/// output-shape constraint, and returns the parsed raw document. Makes no
/// retry: repeated identical prompts to a non-deterministic backend carry no
/// idempotence guarantee, so retrying is a caller policy on a fresh job.
#[derive(Clone)]
pub struct AnalysisDispatcher {
    backend: Arc<dyn AnalysisBackend>,
}

impl AnalysisDispatcher {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self { backend }
    }

    /// Run one analysis, returning the raw (not yet validated) document.
    ///
    /// Transport failure, timeout, and output that fails document parse all
    /// surface as [`ScanError::AnalysisUnavailable`]; schema validation is
    /// the normalizer's job.
    pub async fn dispatch(
        &self,
        content: &str,
        scan_type: ScanType,
        mode: ScanMode,
    ) -> Result<Value, ScanError> {
        let profile = AnalysisProfile::resolve(scan_type, mode);
        let contract = SchemaRegistry::for_profile(profile);

        let request = AnalysisRequest {
            system_instruction: PromptBuilder::system_instruction(profile).to_string(),
            prompt: PromptBuilder::build_prompt(profile, scan_type, content),
            response_schema: contract.response_schema(),
        };

        debug!(
            backend = self.backend.name(),
            scan_type = %scan_type,
            profile = ?profile,
            "Dispatching analysis"
        );

        let text = self
            .backend
            .analyze(request)
            .await
            .map_err(Self::into_scan_error)?;

        parse_document(&text).map_err(Self::into_scan_error)
    }

    fn into_scan_error(err: AnalysisError) -> ScanError {
        match err {
            AnalysisError::Configuration(message) => ScanError::Configuration(message),
            other => ScanError::AnalysisUnavailable(other.to_string()),
        }
    }
}
