use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::MarketplaceConfig;
use crate::marketplace::domain::{Company, WasteLot};
use crate::marketplace::repository::{CatalogRepository, InMemoryCatalog, RepositoryError};
use crate::marketplace::{
    marketplace_router, CompatibilityTable, MarketplaceCatalog, MarketplaceService,
};

pub(super) type DemoService = MarketplaceService<InMemoryCatalog, CompatibilityTable>;

pub(super) fn marketplace_config() -> MarketplaceConfig {
    MarketplaceConfig::default()
}

pub(super) fn build_service() -> DemoService {
    service_over(MarketplaceCatalog::demo())
}

pub(super) fn service_over(catalog: MarketplaceCatalog) -> DemoService {
    MarketplaceService::new(
        Arc::new(InMemoryCatalog::new(catalog)),
        Arc::new(CompatibilityTable::demo()),
        &marketplace_config(),
    )
    .expect("default config is valid")
}

pub(super) fn router_with_service(service: DemoService) -> axum::Router {
    marketplace_router(Arc::new(service))
}

pub(super) struct OfflineCatalog;

impl CatalogRepository for OfflineCatalog {
    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }

    fn wastes(&self) -> Result<Vec<WasteLot>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
