//! Domain layer: scan jobs, report variants, schema contracts, and errors.

pub mod entities;
pub mod errors;
pub mod report;
pub mod schema;
pub mod value_objects;

pub use entities::ScanJob;
pub use errors::ScanError;
pub use report::{Report, ReportBody, SeverityHistogram};
pub use schema::{ReportContract, SchemaRegistry};
pub use value_objects::{AnalysisProfile, JobStatus, ScanMode, ScanType, Severity};
