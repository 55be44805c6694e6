//! JSON-over-HTTP surface of the dashboard.

pub mod handlers;
pub mod response;

use crate::dashboard::Dashboard;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Extension, Router};
use std::sync::Arc;

/// Upload bodies larger than this are rejected unless configured otherwise.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Builds the router for `dashboard`.
///
/// # Arguments
///
/// * `dashboard` - The shared dashboard every handler forwards to.
/// * `max_upload_bytes` - Body limit for the upload route.
pub fn router(dashboard: Arc<Dashboard>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:id",
            get(handlers::view).delete(handlers::close_session),
        )
        .route(
            "/sessions/:id/upload",
            post(handlers::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/sessions/:id/filter", post(handlers::apply_filter))
        .route("/sessions/:id/clear", post(handlers::clear_filters))
        .route("/sessions/:id/options", get(handlers::zone_options))
        .route("/sessions/:id/rows", get(handlers::rows))
        .route("/sessions/:id/map", get(handlers::map))
        .route("/sessions/:id/export.csv", get(handlers::export_csv))
        .layer(Extension(dashboard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::fetch::FailurePolicy;
    use crate::test_support::{StaticSource, UPLOAD_CSV};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let dashboard = Dashboard::builder()
            .source(Arc::new(StaticSource::thunderstorms()))
            .failure_policy(FailurePolicy::AbortBatch)
            .build();
        router(Arc::new(dashboard), DEFAULT_MAX_UPLOAD_BYTES)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn json(app: &Router, method: Method, uri: &str, body: Body) -> (StatusCode, Value) {
        let (status, bytes) = send(app, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = json(app, Method::POST, "/sessions", Body::empty()).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = json(&app(), Method::GET, "/health", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let app = app();
        let id = new_session(&app).await;

        let (status, view) = json(
            &app,
            Method::POST,
            &format!("/sessions/{id}/upload?filename=points.csv"),
            Body::from(UPLOAD_CSV),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["raw_rows"], 3);
        assert_eq!(view["controls"]["export_enabled"], true);

        let (status, view) = json(
            &app,
            Method::POST,
            &format!("/sessions/{id}/filter"),
            Body::from(r#"{"zone2": "South"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["filtered_rows"], 1);

        let (_, page) = json(
            &app,
            Method::GET,
            &format!("/sessions/{id}/rows?page=0"),
            Body::empty(),
        )
        .await;
        assert_eq!(page["page_size"], 5);
        assert_eq!(page["rows"][0]["zone2"], "South");

        let (_, options) = json(
            &app,
            Method::GET,
            &format!("/sessions/{id}/options"),
            Body::empty(),
        )
        .await;
        assert_eq!(options["zone1"][0]["label"], "A");

        let (_, map) = json(&app, Method::GET, &format!("/sessions/{id}/map"), Body::empty()).await;
        assert_eq!(map["points"].as_array().unwrap().len(), 1);

        let (status, view) = json(
            &app,
            Method::POST,
            &format!("/sessions/{id}/clear"),
            Body::empty(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["filtered_rows"], 3);
    }

    #[tokio::test]
    async fn test_export_is_a_csv_attachment() {
        let app = app();
        let id = new_session(&app).await;
        send(
            &app,
            Method::POST,
            &format!("/sessions/{id}/upload?filename=points.csv"),
            Body::from(UPLOAD_CSV),
        )
        .await;

        let request = Request::builder()
            .uri(format!("/sessions/{id}/export.csv"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"data.csv\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&body).lines().count(), 4);
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let app = app();
        let (status, body) = json(
            &app,
            Method::GET,
            &format!("/sessions/{}", uuid::Uuid::new_v4()),
            Body::empty(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().is_some());

        let (status, _) = send(&app, Method::GET, "/sessions/not-a-uuid", Body::empty()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let id = new_session(&app).await;
        let (status, _) = json(
            &app,
            Method::GET,
            &format!("/sessions/{id}/export.csv"),
            Body::empty(),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = json(
            &app,
            Method::POST,
            &format!("/sessions/{id}/filter"),
            Body::from("{}"),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        send(
            &app,
            Method::POST,
            &format!("/sessions/{id}/upload?filename=points.csv"),
            Body::from(UPLOAD_CSV),
        )
        .await;
        let (status, _) = json(
            &app,
            Method::GET,
            &format!("/sessions/{id}/rows?page_size=0"),
            Body::empty(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_upload_leaves_session_empty() {
        let app = app();
        let id = new_session(&app).await;
        let (status, view) = json(
            &app,
            Method::POST,
            &format!("/sessions/{id}/upload?filename=points.pdf"),
            Body::from("%PDF"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["raw_rows"], 0);
        assert_eq!(view["controls"]["filter_enabled"], false);
    }

    #[tokio::test]
    async fn test_closed_session_is_gone() {
        let app = app();
        let id = new_session(&app).await;
        let (status, _) = send(&app, Method::DELETE, &format!("/sessions/{id}"), Body::empty()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = json(&app, Method::GET, &format!("/sessions/{id}"), Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
