//! Scan API controllers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::error;
use uuid::Uuid;

use crate::application::query::JobFilter;
use crate::application::workflow::ScanWorkflow;
use crate::infrastructure::job_store::{JobStore, JobStoreError};
use crate::presentation::models::{
    HealthResponse, ScanDetailDto, ScanListResponse, ScanSummaryDto, StartScanRequest,
    StartScanResponse,
};

/// Application state for the scan API
#[derive(Clone)]
pub struct AppState {
    pub workflow: ScanWorkflow,
    pub store: Arc<dyn JobStore>,
}

/// POST /api/scans - Submit an artifact for analysis
#[utoipa::path(
    post,
    path = "/api/scans",
    request_body = StartScanRequest,
    responses(
        (status = 202, description = "Scan job accepted", body = StartScanResponse),
        (status = 422, description = "Empty name or content"),
        (status = 500, description = "Internal server error")
    ),
    tag = "scans"
)]
pub async fn start_scan(
    State(state): State<AppState>,
    Json(request): Json<StartScanRequest>,
) -> Result<(StatusCode, Json<StartScanResponse>), StatusCode> {
    if request.name.trim().is_empty() || request.content.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let job_id = state
        .workflow
        .start_scan(request.name, request.content, request.scan_type, request.mode)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create scan job");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((StatusCode::ACCEPTED, Json(StartScanResponse { job_id })))
}

/// GET /api/scans - List scan jobs, optionally filtered by type and status
#[utoipa::path(
    get,
    path = "/api/scans",
    params(JobFilter),
    responses(
        (status = 200, description = "Matching jobs, most recent first", body = ScanListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "scans"
)]
pub async fn list_scans(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<ScanListResponse>, StatusCode> {
    let jobs = state.store.list(&filter).await.map_err(|e| {
        error!(error = %e, "Failed to list scan jobs");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let scans: Vec<ScanSummaryDto> = jobs.iter().map(ScanSummaryDto::from).collect();
    let total = scans.len();
    Ok(Json(ScanListResponse { scans, total }))
}

/// GET /api/scans/{id} - Retrieve one scan job with its report
#[utoipa::path(
    get,
    path = "/api/scans/{id}",
    params(
        ("id" = Uuid, Path, description = "Scan job ID")
    ),
    responses(
        (status = 200, description = "Job found", body = ScanDetailDto),
        (status = 404, description = "Job not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "scans"
)]
pub async fn get_scan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScanDetailDto>, StatusCode> {
    match state.store.get(id).await {
        Ok(job) => Ok(Json(ScanDetailDto::from(job))),
        Err(JobStoreError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!(job_id = %id, error = %e, "Failed to retrieve scan job");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /health - Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
