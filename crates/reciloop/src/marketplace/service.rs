use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::compatibility::CompatibilitySource;
use super::domain::{Company, CompanyId, MarketplaceError, MatchStatus, WasteLot};
use super::inventory::{inventory_snapshot, InventoryEntry};
use super::matching::{MatchCandidate, MatchGenerator};
use super::repository::{CatalogRepository, RepositoryError};
use super::roi::{RoiEstimate, RoiEstimator, RoiRequest};
use super::scoring::MatchScorer;
use super::views::{esg_ranking, DashboardStats, EsgRankingEntry};
use crate::config::MarketplaceConfig;

/// Service composing the catalog, match generator, and ROI estimator.
pub struct MarketplaceService<R, C> {
    catalog: Arc<R>,
    generator: MatchGenerator<C>,
    estimator: RoiEstimator,
    threshold: f64,
}

impl<R, C> MarketplaceService<R, C>
where
    R: CatalogRepository + 'static,
    C: CompatibilitySource + 'static,
{
    pub fn new(
        catalog: Arc<R>,
        compatibility: Arc<C>,
        config: &MarketplaceConfig,
    ) -> Result<Self, MarketplaceError> {
        let estimator = RoiEstimator::new(config.fixed_investment)?;
        if !config.match_threshold.is_finite() || config.match_threshold < 0.0 {
            return Err(MarketplaceError::InvalidInput {
                field: "threshold",
                value: config.match_threshold,
            });
        }

        Ok(Self {
            catalog,
            generator: MatchGenerator::new(MatchScorer::new(compatibility)),
            estimator,
            threshold: config.match_threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn estimator(&self) -> &RoiEstimator {
        &self.estimator
    }

    pub fn companies(&self) -> Result<Vec<Company>, MarketplaceServiceError> {
        Ok(self.catalog.companies()?)
    }

    pub fn company(&self, id: CompanyId) -> Result<Company, MarketplaceServiceError> {
        self.catalog
            .company(id)?
            .ok_or(MarketplaceServiceError::CompanyNotFound(id))
    }

    /// Resolve the company the caller is acting for.
    pub fn caller(&self, id: CompanyId) -> Result<Company, MarketplaceServiceError> {
        match self.catalog.company(id)? {
            Some(company) => Ok(company),
            None => {
                warn!(company_id = %id, "request from unknown company");
                Err(MarketplaceServiceError::UnknownCaller(id))
            }
        }
    }

    pub fn wastes(&self, category: Option<&str>) -> Result<Vec<WasteLot>, MarketplaceServiceError> {
        let wastes = self.catalog.wastes()?;
        Ok(match category {
            Some(wanted) => wastes
                .into_iter()
                .filter(|waste| waste.category == wanted)
                .collect(),
            None => wastes,
        })
    }

    /// Ranked candidates over the whole catalog, using the configured threshold unless
    /// one is supplied.
    pub fn matches(
        &self,
        threshold: Option<f64>,
    ) -> Result<Vec<MatchCandidate>, MarketplaceServiceError> {
        let wastes = self.catalog.wastes()?;
        let companies = self.catalog.companies()?;
        let threshold = threshold.unwrap_or(self.threshold);

        Ok(self.generator.generate(&wastes, &companies, threshold)?)
    }

    /// Ranked candidates in which `company_id` is the generator or the consumer.
    pub fn matches_for(
        &self,
        company_id: CompanyId,
        threshold: Option<f64>,
    ) -> Result<Vec<MatchCandidate>, MarketplaceServiceError> {
        let mut matches = self.matches(threshold)?;
        matches.retain(|candidate| candidate.involves(company_id));
        Ok(matches)
    }

    /// Acknowledge a generated match on behalf of one of its parties. Ids are stable across
    /// thresholds; `threshold` only needs to be low enough to include the pairing. Nothing is
    /// stored; the hosting layer owns persistence of accepted matches.
    pub fn accept_match(
        &self,
        match_id: u32,
        caller: CompanyId,
        threshold: Option<f64>,
    ) -> Result<MatchAcceptance, MarketplaceServiceError> {
        let candidate = self
            .matches(threshold)?
            .into_iter()
            .find(|candidate| candidate.id == match_id)
            .ok_or(MarketplaceServiceError::MatchNotFound(match_id))?;

        if !candidate.involves(caller) {
            return Err(MarketplaceServiceError::NotMatchParty {
                match_id,
                company_id: caller,
            });
        }

        debug!(match_id, company_id = %caller, "match accepted");

        Ok(MatchAcceptance {
            match_id,
            accepted_by: caller,
            status: MatchStatus::Accepted,
            message: format!(
                "match between {} and {} for {} accepted",
                candidate.generator_company.name,
                candidate.consumer_company.name,
                candidate.waste.name
            ),
        })
    }

    pub fn estimate_roi(&self, request: RoiRequest) -> Result<RoiEstimate, MarketplaceServiceError> {
        Ok(self.estimator.evaluate(request)?)
    }

    pub fn inventory(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<InventoryEntry>, MarketplaceServiceError> {
        let wastes = self.catalog.wastes()?;
        let companies = self.catalog.companies()?;
        Ok(inventory_snapshot(&wastes, &companies, as_of)?)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::demo()
    }

    pub fn esg_ranking(&self) -> Vec<EsgRankingEntry> {
        esg_ranking()
    }
}

/// Confirmation returned when a party accepts a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAcceptance {
    pub match_id: u32,
    pub accepted_by: CompanyId,
    pub status: MatchStatus,
    pub message: String,
}

/// Error raised by the marketplace service.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceServiceError {
    #[error(transparent)]
    Marketplace(#[from] MarketplaceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("company {0} not found")]
    CompanyNotFound(CompanyId),
    #[error("company {0} is not registered in the marketplace")]
    UnknownCaller(CompanyId),
    #[error("match {0} not found")]
    MatchNotFound(u32),
    #[error("company {company_id} is not a party to match {match_id}")]
    NotMatchParty { match_id: u32, company_id: CompanyId },
}
