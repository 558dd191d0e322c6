//! Sentinel - security scan service
//!
//! Accepts heterogeneous security-relevant artifacts (application source,
//! API specifications, smart-contract source, bug reports), dispatches them
//! to an opaque LLM analysis backend, and tracks each scan as an
//! asynchronous job through to a canonical structured report.
//!
//! # Modules
//!
//! - [`domain`] — scan jobs, report variants, schema contracts, errors
//! - [`application`] — job workflow, report normalization, list queries
//! - [`infrastructure`] — job store and the analysis backend boundary
//! - [`presentation`] — axum HTTP surface with OpenAPI docs
//! - [`config`] — strongly-typed configuration with env-var support
//! - [`logging`] — structured logging with tracing
//!
//! # Configuration
//!
//! Environment variables use the `SENTINEL__` prefix with double underscore
//! separators:
//!
//! ```bash
//! SENTINEL__SERVER__PORT=3000
//! SENTINEL__ANALYSIS__TIMEOUT_SECONDS=120
//! ```

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::create_app;
pub use config::Config;
pub use logging::init_tracing;
