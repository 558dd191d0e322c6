//! Application setup and wiring

use std::sync::Arc;

use axum::Router;

use crate::application::workflow::ScanWorkflow;
use crate::config::Config;
use crate::infrastructure::analysis::{AnalysisDispatcher, GeminiBackend};
use crate::infrastructure::job_store::{InMemoryJobStore, JobStore};
use crate::presentation::controllers::AppState;
use crate::presentation::routes::create_router;

/// Wire the job store, analysis backend, and workflow into a router.
pub fn create_app(config: &Config) -> Router {
    let store: Arc<dyn JobStore> = Arc::new(InMemoryJobStore::new());
    let backend = Arc::new(GeminiBackend::new(config.analysis.clone()));
    let dispatcher = AnalysisDispatcher::new(backend);
    let workflow = ScanWorkflow::new(store.clone(), dispatcher);

    create_router(AppState { workflow, store }, &config.server)
}
