use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::compatibility::CompatibilitySource;
use super::domain::{Company, CompanyId, MarketplaceError, MatchStatus, WasteLot};
use super::scoring::MatchScorer;

/// Candidates must score strictly above this unless the caller overrides it.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 70.0;

/// Share of the lot's market value the consumer is expected to save.
pub const VALUE_CAPTURE_RATE: f64 = 0.8;

/// A proposed pairing of one waste lot with one consuming company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// 1-based position of the pairing among all eligible waste/consumer pairs in generation
    /// order, counted before the threshold applies so it is the same at every threshold.
    pub id: u32,
    pub waste: WasteLot,
    pub generator_company: Company,
    pub consumer_company: Company,
    pub score: f64,
    pub estimated_savings: f64,
    pub status: MatchStatus,
}

impl MatchCandidate {
    pub fn involves(&self, company_id: CompanyId) -> bool {
        self.generator_company.id == company_id || self.consumer_company.id == company_id
    }
}

/// Runs the scorer across every waste lot and eligible consumer.
pub struct MatchGenerator<C> {
    scorer: MatchScorer<C>,
}

impl<C: CompatibilitySource> MatchGenerator<C> {
    pub fn new(scorer: MatchScorer<C>) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &MatchScorer<C> {
        &self.scorer
    }

    /// Rank candidates scoring above `threshold`, highest first. Equal scores keep
    /// generation order.
    pub fn generate(
        &self,
        wastes: &[WasteLot],
        companies: &[Company],
        threshold: f64,
    ) -> Result<Vec<MatchCandidate>, MarketplaceError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(MarketplaceError::InvalidInput {
                field: "threshold",
                value: threshold,
            });
        }

        let by_id: HashMap<CompanyId, &Company> =
            companies.iter().map(|company| (company.id, company)).collect();

        let mut candidates = Vec::new();
        let mut pair_number: u32 = 0;
        for waste in wastes {
            let generator =
                by_id
                    .get(&waste.company_id)
                    .ok_or(MarketplaceError::DataIntegrity {
                        waste_id: waste.id,
                        company_id: waste.company_id,
                    })?;

            for consumer in companies
                .iter()
                .filter(|company| company.id != waste.company_id && company.can_consume())
            {
                pair_number += 1;
                let score = self.scorer.score(waste, generator, consumer);
                if score <= threshold {
                    continue;
                }

                candidates.push(MatchCandidate {
                    id: pair_number,
                    waste: waste.clone(),
                    generator_company: (*generator).clone(),
                    consumer_company: consumer.clone(),
                    score,
                    estimated_savings: waste.market_value() * VALUE_CAPTURE_RATE,
                    status: MatchStatus::Pending,
                });
            }
        }

        candidates.sort_by(|left, right| right.score.total_cmp(&left.score));

        debug!(
            wastes = wastes.len(),
            companies = companies.len(),
            threshold,
            matches = candidates.len(),
            "generated match candidates"
        );

        Ok(candidates)
    }
}
