//! Infrastructure layer: job storage and the external analysis boundary.

pub mod analysis;
pub mod job_store;

pub use analysis::{AnalysisBackend, AnalysisDispatcher, GeminiBackend};
pub use job_store::{InMemoryJobStore, JobStore, JobStoreError, StatusChange};
