use crate::infra::{AppState, ClosureDataSource, ClosureReportPayload};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use closure_stats::config::DatasetConfig;
use closure_stats::error::AppError;
use closure_stats::workflows::closures::{ClosureDataset, ClosureImporter, ReportOptions};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Request body cap for report uploads; a nationwide export runs to tens of MB.
pub(crate) const UPLOAD_LIMIT_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClosureReportRequest {
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    #[serde(default)]
    pub(crate) recent_window: Option<usize>,
    #[serde(default)]
    pub(crate) reference_year: Option<String>,
}

impl ClosureReportRequest {
    fn options(&self) -> ReportOptions {
        let defaults = ReportOptions::default();
        ReportOptions {
            top_n: self.top_n.unwrap_or(defaults.top_n),
            recent_window: self.recent_window.unwrap_or(defaults.recent_window),
            reference_year: self.reference_year.clone(),
            ..defaults
        }
    }
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/closures/report",
            post(closure_report_endpoint).layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES)),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn closure_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ClosureReportRequest>,
) -> Result<Json<ClosureReportPayload>, AppError> {
    let options = payload.options();

    let (dataset, data_source) = match payload.csv {
        Some(csv) => (ClosureImporter::from_text(&csv)?, ClosureDataSource::Upload),
        None => (
            load_configured_dataset(state.dataset.clone()).await?,
            ClosureDataSource::Dataset,
        ),
    };

    let body = ClosureReportPayload::build(&dataset, data_source, &options);
    info!(
        ?data_source,
        rows = body.rows,
        total = body.report.total_closures,
        "closure report built"
    );

    Ok(Json(body))
}

/// Reads, decodes and parses the configured export off the async workers.
pub(crate) async fn load_configured_dataset(
    dataset: Arc<DatasetConfig>,
) -> Result<ClosureDataset, AppError> {
    let path = dataset.require_path()?.clone();
    let encoding = dataset.encoding.clone();

    tokio::task::spawn_blocking(move || ClosureImporter::from_path(path, &encoding))
        .await
        .map_err(|err| AppError::Server(axum::Error::new(err)))?
        .map_err(AppError::from)
}
