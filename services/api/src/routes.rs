use crate::infra::{AppState, Marketplace};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use reciloop::marketplace::marketplace_router;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_marketplace_routes(service: Arc<Marketplace>) -> axum::Router {
    marketplace_router(service)
        .route("/", axum::routing::get(banner))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn banner() -> Json<serde_json::Value> {
    Json(json!({
        "message": "ReciLoop API - circular economy marketplace for the Suape industrial complex",
        "version": env!("CARGO_PKG_VERSION"),
    }))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::build_marketplace;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use reciloop::config::MarketplaceConfig;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let marketplace =
            Arc::new(build_marketplace(&MarketplaceConfig::default()).expect("demo marketplace"));
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        };
        with_marketplace_routes(marketplace).layer(Extension(state))
    }

    async fn status_of(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn banner_names_the_service() {
        let Json(body) = banner().await;
        assert!(body["message"]
            .as_str()
            .unwrap_or_default()
            .starts_with("ReciLoop API"));
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        assert_eq!(status_of(app(false), "/ready").await, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_of(app(true), "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn marketplace_routes_are_mounted() {
        assert_eq!(status_of(app(true), "/health").await, StatusCode::OK);
        assert_eq!(status_of(app(true), "/api/v1/esg/ranking").await, StatusCode::OK);
        assert_eq!(
            status_of(app(true), "/api/v1/matches").await,
            StatusCode::UNAUTHORIZED
        );
    }
}
