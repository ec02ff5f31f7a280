use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::compatibility::{clamp_unit, CompatibilitySource, DEFAULT_COMPATIBILITY};
use super::domain::{Company, WasteLot};

/// All participants sit inside the same industrial port complex, so proximity is constant
/// until location data is available.
pub const GEOGRAPHIC_PROXIMITY: f64 = 0.95;

const CHEMICAL_WEIGHT: f64 = 0.4;
const GEOGRAPHIC_WEIGHT: f64 = 0.3;
const ECONOMIC_WEIGHT: f64 = 0.3;
const ECONOMIC_PRICE_CEILING: f64 = 1000.0;

/// Coefficients behind a compatibility score and their weighted share of it, kept for audit
/// display. Contributions are fractions of the unscaled blend; their sum times 100 is the score
/// before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub chemical: f64,
    pub geographic: f64,
    pub economic: f64,
    pub chemical_contribution: f64,
    pub geographic_contribution: f64,
    pub economic_contribution: f64,
    pub score: f64,
}

/// Weighted blend of material compatibility, proximity, and economic value.
pub struct MatchScorer<C> {
    compatibility: Arc<C>,
}

impl<C> Clone for MatchScorer<C> {
    fn clone(&self) -> Self {
        Self {
            compatibility: Arc::clone(&self.compatibility),
        }
    }
}

impl<C: CompatibilitySource> MatchScorer<C> {
    pub fn new(compatibility: Arc<C>) -> Self {
        Self { compatibility }
    }

    pub fn compatibility(&self) -> &C {
        &self.compatibility
    }

    /// Score in `[0, 100]`, rounded to one decimal place.
    pub fn score(&self, waste: &WasteLot, generator: &Company, consumer: &Company) -> f64 {
        self.breakdown(waste, generator, consumer).score
    }

    pub fn breakdown(
        &self,
        waste: &WasteLot,
        _generator: &Company,
        consumer: &Company,
    ) -> ScoreBreakdown {
        let chemical = self
            .compatibility
            .coefficient(&waste.name, &consumer.name)
            .map(clamp_unit)
            .unwrap_or(DEFAULT_COMPATIBILITY);
        let geographic = GEOGRAPHIC_PROXIMITY;
        let economic = clamp_unit(waste.price_per_unit / ECONOMIC_PRICE_CEILING);

        let chemical_contribution = chemical * CHEMICAL_WEIGHT;
        let geographic_contribution = geographic * GEOGRAPHIC_WEIGHT;
        let economic_contribution = economic * ECONOMIC_WEIGHT;
        let blended = chemical_contribution + geographic_contribution + economic_contribution;

        ScoreBreakdown {
            chemical,
            geographic,
            economic,
            chemical_contribution,
            geographic_contribution,
            economic_contribution,
            score: round_to_tenth(blended * 100.0),
        }
    }
}

/// Round the exact binary value to one decimal place, without an intermediate scaling step.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
