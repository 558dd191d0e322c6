//! Application layer: scan workflow, report normalization, job queries.

pub mod normalizer;
pub mod query;
pub mod workflow;

pub use normalizer::normalize;
pub use query::{JobFilter, filter_jobs};
pub use workflow::ScanWorkflow;
