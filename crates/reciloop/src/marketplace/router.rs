use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::compatibility::CompatibilitySource;
use super::domain::{CompanyId, MarketplaceError};
use super::matching::MatchCandidate;
use super::repository::CatalogRepository;
use super::roi::RoiRequest;
use super::service::{MarketplaceService, MarketplaceServiceError};

/// Header carrying the company the authenticated caller acts for.
pub const CALLER_COMPANY_HEADER: &str = "x-company-id";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WasteQuery {
    #[serde(default)]
    pub(crate) category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MatchQuery {
    #[serde(default)]
    pub(crate) threshold: Option<f64>,
    #[serde(default)]
    pub(crate) involving_me: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AcceptQuery {
    #[serde(default)]
    pub(crate) threshold: Option<f64>,
}

/// Ranked match listing returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListView {
    pub generated_at: DateTime<Utc>,
    pub threshold: f64,
    pub total: usize,
    pub matches: Vec<MatchCandidate>,
}

/// Router builder exposing catalog, matching, ROI, and dashboard endpoints.
pub fn marketplace_router<R, C>(service: Arc<MarketplaceService<R, C>>) -> Router
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    Router::new()
        .route("/api/v1/companies", get(companies_handler::<R, C>))
        .route(
            "/api/v1/companies/:company_id",
            get(company_handler::<R, C>),
        )
        .route("/api/v1/wastes", get(wastes_handler::<R, C>))
        .route("/api/v1/matches", get(matches_handler::<R, C>))
        .route(
            "/api/v1/matches/:match_id/accept",
            post(accept_handler::<R, C>),
        )
        .route("/api/v1/roi/calculate", post(roi_handler::<R, C>))
        .route("/api/v1/dashboard/stats", get(dashboard_handler::<R, C>))
        .route("/api/v1/esg/ranking", get(esg_handler::<R, C>))
        .route(
            "/api/v1/inventory/real-time",
            get(inventory_handler::<R, C>),
        )
        .with_state(service)
}

pub(crate) async fn companies_handler<R, C>(
    State(service): State<Arc<MarketplaceService<R, C>>>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    match service.companies() {
        Ok(companies) => (StatusCode::OK, Json(companies)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn company_handler<R, C>(
    State(service): State<Arc<MarketplaceService<R, C>>>,
    Path(company_id): Path<u32>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    match service.company(CompanyId(company_id)) {
        Ok(company) => (StatusCode::OK, Json(company)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn wastes_handler<R, C>(
    State(service): State<Arc<MarketplaceService<R, C>>>,
    Query(query): Query<WasteQuery>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    match service.wastes(query.category.as_deref()) {
        Ok(wastes) => (StatusCode::OK, Json(wastes)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn matches_handler<R, C>(
    State(service): State<Arc<MarketplaceService<R, C>>>,
    headers: HeaderMap,
    Query(query): Query<MatchQuery>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    let caller = match authenticate(&service, &headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let result = if query.involving_me {
        service.matches_for(caller, query.threshold)
    } else {
        service.matches(query.threshold)
    };

    match result {
        Ok(matches) => {
            let view = MatchListView {
                generated_at: Utc::now(),
                threshold: query.threshold.unwrap_or(service.threshold()),
                total: matches.len(),
                matches,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn accept_handler<R, C>(
    State(service): State<Arc<MarketplaceService<R, C>>>,
    headers: HeaderMap,
    Path(match_id): Path<u32>,
    Query(query): Query<AcceptQuery>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    let caller = match authenticate(&service, &headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match service.accept_match(match_id, caller, query.threshold) {
        Ok(acceptance) => (StatusCode::OK, Json(acceptance)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn roi_handler<R, C>(
    State(service): State<Arc<MarketplaceService<R, C>>>,
    Json(request): Json<RoiRequest>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    match service.estimate_roi(request) {
        Ok(estimate) => (StatusCode::OK, Json(estimate)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dashboard_handler<R, C>(
    State(service): State<Arc<MarketplaceService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    if let Err(response) = authenticate(&service, &headers) {
        return response;
    }

    (StatusCode::OK, Json(service.dashboard_stats())).into_response()
}

pub(crate) async fn esg_handler<R, C>(
    State(service): State<Arc<MarketplaceService<R, C>>>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    (StatusCode::OK, Json(service.esg_ranking())).into_response()
}

pub(crate) async fn inventory_handler<R, C>(
    State(service): State<Arc<MarketplaceService<R, C>>>,
) -> Response
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    match service.inventory(Utc::now()) {
        Ok(inventory) => (StatusCode::OK, Json(inventory)).into_response(),
        Err(err) => error_response(err),
    }
}

fn authenticate<R, C>(
    service: &MarketplaceService<R, C>,
    headers: &HeaderMap,
) -> Result<CompanyId, Response>
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    let company_id = headers
        .get(CALLER_COMPANY_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u32>().ok())
        .map(CompanyId)
        .ok_or_else(|| {
            let payload = json!({
                "error": format!("missing or malformed {CALLER_COMPANY_HEADER} header"),
            });
            (StatusCode::UNAUTHORIZED, Json(payload)).into_response()
        })?;

    service
        .caller(company_id)
        .map(|company| company.id)
        .map_err(error_response)
}

impl MarketplaceServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarketplaceServiceError::Marketplace(MarketplaceError::InvalidInput { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            MarketplaceServiceError::CompanyNotFound(_)
            | MarketplaceServiceError::MatchNotFound(_) => StatusCode::NOT_FOUND,
            MarketplaceServiceError::UnknownCaller(_) => StatusCode::UNAUTHORIZED,
            MarketplaceServiceError::NotMatchParty { .. } => StatusCode::FORBIDDEN,
            MarketplaceServiceError::Marketplace(MarketplaceError::DataIntegrity { .. })
            | MarketplaceServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn error_response(err: MarketplaceServiceError) -> Response {
    let status = err.status_code();
    if status.is_server_error() {
        warn!(error = %err, "marketplace request failed");
    }

    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}
