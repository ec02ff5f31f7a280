//! Waste-to-resource matching for the circular-economy marketplace.
//!
//! The scoring, match generation, and ROI modules are pure functions over the data they are
//! handed. The service and router wrap them with catalog access and an HTTP surface.

pub mod catalog;
pub mod compatibility;
pub mod domain;
pub mod inventory;
pub mod matching;
pub mod repository;
pub mod roi;
pub mod router;
pub mod scoring;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogImportError, CatalogImporter, MarketplaceCatalog};
pub use compatibility::{CompatibilitySource, CompatibilityTable, DEFAULT_COMPATIBILITY};
pub use domain::{
    Company, CompanyId, CompanyRole, MarketplaceError, MatchStatus, WasteLot, WasteLotId,
};
pub use inventory::{inventory_snapshot, InventoryEntry, InventoryStatus};
pub use matching::{MatchCandidate, MatchGenerator, DEFAULT_MATCH_THRESHOLD, VALUE_CAPTURE_RATE};
pub use repository::{CatalogRepository, InMemoryCatalog, RepositoryError};
pub use roi::{
    estimate, RoiEstimate, RoiEstimator, RoiRequest, DEFAULT_FIXED_INVESTMENT,
    MINIMUM_PAYBACK_DAYS,
};
pub use router::{marketplace_router, MatchListView, CALLER_COMPANY_HEADER};
pub use scoring::{MatchScorer, ScoreBreakdown, GEOGRAPHIC_PROXIMITY};
pub use service::{MarketplaceService, MarketplaceServiceError, MatchAcceptance};
pub use views::{esg_ranking, DashboardStats, EsgRankingEntry, MonthlySavings};
