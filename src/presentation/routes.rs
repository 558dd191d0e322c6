//! Route definitions and router setup

use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;
use crate::presentation::controllers::{
    AppState, get_scan, health_check, list_scans, start_scan,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::start_scan,
        crate::presentation::controllers::list_scans,
        crate::presentation::controllers::get_scan,
        crate::presentation::controllers::health_check,
    ),
    components(schemas(
        crate::presentation::models::StartScanRequest,
        crate::presentation::models::StartScanResponse,
        crate::presentation::models::ScanListResponse,
        crate::presentation::models::ScanSummaryDto,
        crate::presentation::models::ScanDetailDto,
        crate::presentation::models::HealthResponse,
        crate::domain::report::Report,
        crate::domain::report::Finding,
        crate::domain::report::Web3Finding,
        crate::domain::report::GherkinFeature,
        crate::domain::report::ApiTestCase,
    )),
    tags(
        (name = "scans", description = "Scan job submission and retrieval"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Build the application router.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/api/scans", post(start_scan).get(list_scans))
        .route("/api/scans/{id}", get(get_scan));

    if server.enable_docs {
        router = router
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_seconds,
                )))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
