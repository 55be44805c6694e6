//! Request handlers. Each one forwards to [`Dashboard`] and serializes the result.

use crate::dashboard::{Dashboard, MapView, SessionView, DEFAULT_PAGE_SIZE};
use crate::error::DashboardError;
use crate::frame::enriched_frame::TablePage;
use crate::session::store::SessionId;
use crate::types::filter_params::FilterParams;
use crate::types::zone_option::ZoneOptions;
use axum::body::Bytes;
use axum::extract::{Extension, Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name offered to the browser for CSV downloads.
pub const EXPORT_FILE_NAME: &str = "data.csv";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct CreatedSession {
    pub session_id: SessionId,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

#[derive(Debug, Deserialize)]
pub struct RowsQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// POST /sessions
pub async fn create_session(
    Extension(dashboard): Extension<Arc<Dashboard>>,
) -> (StatusCode, Json<CreatedSession>) {
    let session_id = dashboard.create_session().await;
    (StatusCode::CREATED, Json(CreatedSession { session_id }))
}

/// DELETE /sessions/:id
pub async fn close_session(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, DashboardError> {
    if dashboard.close_session(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DashboardError::UnknownSession(id))
    }
}

/// GET /sessions/:id
pub async fn view(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionView>, DashboardError> {
    dashboard.view(id).await.map(Json)
}

/// POST /sessions/:id/upload?filename=NAME, body is the file.
pub async fn upload(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<SessionId>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<SessionView>, DashboardError> {
    dashboard.upload(id, &query.filename, &body).await.map(Json)
}

/// POST /sessions/:id/filter
pub async fn apply_filter(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<SessionId>,
    Json(params): Json<FilterParams>,
) -> Result<Json<SessionView>, DashboardError> {
    dashboard.apply_filter(id, params).await.map(Json)
}

/// POST /sessions/:id/clear
pub async fn clear_filters(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionView>, DashboardError> {
    dashboard.clear_filters(id).await.map(Json)
}

/// GET /sessions/:id/options
pub async fn zone_options(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<SessionId>,
) -> Result<Json<ZoneOptions>, DashboardError> {
    dashboard.zone_options(id).await.map(Json)
}

/// GET /sessions/:id/rows?page=&page_size=
pub async fn rows(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<SessionId>,
    Query(query): Query<RowsQuery>,
) -> Result<Json<TablePage>, DashboardError> {
    let page = query.page.unwrap_or(0);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    dashboard.table_page(id, page, page_size).await.map(Json)
}

/// GET /sessions/:id/map
pub async fn map(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<SessionId>,
) -> Result<Json<MapView>, DashboardError> {
    dashboard.map_view(id).await.map(Json)
}

/// GET /sessions/:id/export.csv
pub async fn export_csv(
    Extension(dashboard): Extension<Arc<Dashboard>>,
    Path(id): Path<SessionId>,
) -> Result<impl IntoResponse, DashboardError> {
    let csv = dashboard.export_csv(id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        csv,
    ))
}
