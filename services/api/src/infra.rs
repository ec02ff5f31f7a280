use metrics_exporter_prometheus::PrometheusHandle;
use reciloop::config::MarketplaceConfig;
use reciloop::error::AppError;
use reciloop::marketplace::{
    CatalogImporter, CompatibilityTable, InMemoryCatalog, MarketplaceCatalog, MarketplaceService,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Marketplace = MarketplaceService<InMemoryCatalog, CompatibilityTable>;

/// Load the CSV catalog when configured, otherwise the built-in demo catalog.
pub(crate) fn load_catalog(config: &MarketplaceConfig) -> Result<MarketplaceCatalog, AppError> {
    match &config.catalog {
        Some(source) => {
            info!(
                companies = %source.companies.display(),
                wastes = %source.wastes.display(),
                "loading catalog from csv"
            );
            Ok(CatalogImporter::from_paths(&source.companies, &source.wastes)?)
        }
        None => Ok(MarketplaceCatalog::demo()),
    }
}

pub(crate) fn build_marketplace(config: &MarketplaceConfig) -> Result<Marketplace, AppError> {
    let catalog = load_catalog(config)?;
    let service = MarketplaceService::new(
        Arc::new(InMemoryCatalog::new(catalog)),
        Arc::new(CompatibilityTable::demo()),
        config,
    )?;
    Ok(service)
}

pub(crate) fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("threshold must be between 0 and 100 (got {value})"))
    }
}
