use std::sync::Arc;

use super::catalog::MarketplaceCatalog;
use super::domain::{Company, CompanyId, WasteLot};

/// Read access to the catalog so the service module can be exercised in isolation.
///
/// Implementations hand out owned snapshots; one request works against one snapshot.
pub trait CatalogRepository: Send + Sync {
    fn companies(&self) -> Result<Vec<Company>, RepositoryError>;
    fn wastes(&self) -> Result<Vec<WasteLot>, RepositoryError>;

    fn company(&self, id: CompanyId) -> Result<Option<Company>, RepositoryError> {
        Ok(self
            .companies()?
            .into_iter()
            .find(|company| company.id == id))
    }
}

/// Error enumeration for catalog access failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Catalog held in process memory, shared between handlers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    catalog: Arc<MarketplaceCatalog>,
}

impl InMemoryCatalog {
    pub fn new(catalog: MarketplaceCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn demo() -> Self {
        Self::new(MarketplaceCatalog::demo())
    }

    pub fn catalog(&self) -> &MarketplaceCatalog {
        &self.catalog
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn companies(&self) -> Result<Vec<Company>, RepositoryError> {
        Ok(self.catalog.companies().to_vec())
    }

    fn wastes(&self) -> Result<Vec<WasteLot>, RepositoryError> {
        Ok(self.catalog.wastes().to_vec())
    }

    fn company(&self, id: CompanyId) -> Result<Option<Company>, RepositoryError> {
        Ok(self.catalog.company(id).cloned())
    }
}
