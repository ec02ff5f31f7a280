use serde::{Deserialize, Serialize};

use super::domain::{ensure_finite, ensure_non_negative, MarketplaceError};
use super::scoring::round_to_tenth;

/// Up-front cost of setting up a diversion route (logistics, permits, storage).
pub const DEFAULT_FIXED_INVESTMENT: f64 = 1500.0;

/// Minimum operational lead time reported as payback.
pub const MINIMUM_PAYBACK_DAYS: u64 = 7;

const DAYS_PER_MONTH: f64 = 30.0;

/// Caller-supplied parameters for an ROI estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiRequest {
    #[serde(default)]
    pub waste_type: Option<String>,
    pub volume: f64,
    pub disposal_cost: f64,
    pub market_price: f64,
    #[serde(default)]
    pub fixed_investment: Option<f64>,
}

/// Profitability of selling a waste stream instead of paying for its disposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiEstimate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waste_type: Option<String>,
    pub volume: f64,
    pub disposal_cost: f64,
    pub market_price: f64,
    pub fixed_investment: f64,
    pub potential_profit: f64,
    pub payback_days: u64,
    pub roi_percentage: f64,
}

/// Payback and ROI calculator with a configurable default investment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiEstimator {
    fixed_investment: f64,
}

impl Default for RoiEstimator {
    fn default() -> Self {
        Self {
            fixed_investment: DEFAULT_FIXED_INVESTMENT,
        }
    }
}

impl RoiEstimator {
    pub fn new(fixed_investment: f64) -> Result<Self, MarketplaceError> {
        ensure_non_negative("fixed_investment", fixed_investment)?;
        Ok(Self { fixed_investment })
    }

    pub fn fixed_investment(&self) -> f64 {
        self.fixed_investment
    }

    /// Estimate using the configured fixed investment.
    pub fn estimate(
        &self,
        volume: f64,
        disposal_cost: f64,
        market_price: f64,
    ) -> Result<RoiEstimate, MarketplaceError> {
        estimate(volume, disposal_cost, market_price, self.fixed_investment)
    }

    pub fn evaluate(&self, request: RoiRequest) -> Result<RoiEstimate, MarketplaceError> {
        let RoiRequest {
            waste_type,
            volume,
            disposal_cost,
            market_price,
            fixed_investment,
        } = request;

        let mut estimate = estimate(
            volume,
            disposal_cost,
            market_price,
            fixed_investment.unwrap_or(self.fixed_investment),
        )?;
        estimate.waste_type = waste_type;
        Ok(estimate)
    }
}

pub fn estimate(
    volume: f64,
    disposal_cost: f64,
    market_price: f64,
    fixed_investment: f64,
) -> Result<RoiEstimate, MarketplaceError> {
    ensure_non_negative("volume", volume)?;
    ensure_non_negative("disposal_cost", disposal_cost)?;
    ensure_non_negative("market_price", market_price)?;
    ensure_non_negative("fixed_investment", fixed_investment)?;

    let current_expense = volume * disposal_cost;
    let potential_revenue = volume * market_price;
    let potential_profit = potential_revenue - current_expense;
    // finite inputs can still overflow once multiplied
    ensure_finite("potential_profit", potential_profit)?;

    let computed_days = if potential_profit > 0.0 {
        (fixed_investment / potential_profit * DAYS_PER_MONTH).floor() as u64
    } else {
        0
    };

    let roi_percentage = if fixed_investment > 0.0 {
        round_to_tenth(potential_profit / fixed_investment * 100.0)
    } else {
        0.0
    };
    ensure_finite("roi_percentage", roi_percentage)?;

    Ok(RoiEstimate {
        waste_type: None,
        volume,
        disposal_cost,
        market_price,
        fixed_investment,
        potential_profit,
        payback_days: computed_days.max(MINIMUM_PAYBACK_DAYS),
        roi_percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profitable_stream_clamps_payback_to_one_week() {
        let estimate = estimate(500.0, 200.0, 1000.0, 1500.0).expect("valid inputs");

        assert_eq!(estimate.potential_profit, 400_000.0);
        assert_eq!(estimate.payback_days, 7);
        assert_eq!(estimate.roi_percentage, 26666.7);
    }

    #[test]
    fn loss_making_stream_reports_negative_roi() {
        let estimate = estimate(10.0, 50.0, 10.0, 1500.0).expect("valid inputs");

        assert_eq!(estimate.potential_profit, -400.0);
        assert_eq!(estimate.payback_days, 7);
        assert_eq!(estimate.roi_percentage, -26.7);
    }

    #[test]
    fn slow_payback_is_floored_to_whole_days() {
        // profit 100 → 1500 / 100 * 30 = 450 days
        let slow = estimate(10.0, 0.0, 10.0, 1500.0).expect("valid inputs");
        assert_eq!(slow.payback_days, 450);

        // profit 700 → 64.28 days
        let faster = estimate(10.0, 0.0, 70.0, 1500.0).expect("valid inputs");
        assert_eq!(faster.payback_days, 64);
    }

    #[test]
    fn zero_investment_reports_zero_roi() {
        let estimate = estimate(10.0, 5.0, 20.0, 0.0).expect("valid inputs");

        assert_eq!(estimate.roi_percentage, 0.0);
        assert_eq!(estimate.payback_days, MINIMUM_PAYBACK_DAYS);
    }

    #[test]
    fn negative_and_non_finite_inputs_are_rejected() {
        assert_eq!(
            estimate(-1.0, 5.0, 20.0, 1500.0),
            Err(MarketplaceError::InvalidInput {
                field: "volume",
                value: -1.0
            })
        );
        assert!(matches!(
            estimate(1.0, f64::INFINITY, 20.0, 1500.0),
            Err(MarketplaceError::InvalidInput {
                field: "disposal_cost",
                ..
            })
        ));
        assert!(matches!(
            estimate(1.0, 5.0, f64::NAN, 1500.0),
            Err(MarketplaceError::InvalidInput {
                field: "market_price",
                ..
            })
        ));
        assert!(RoiEstimator::new(-10.0).is_err());
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        assert!(matches!(
            estimate(1e200, 1e200, 1e200, 1500.0),
            Err(MarketplaceError::InvalidInput {
                field: "potential_profit",
                ..
            })
        ));
        assert!(matches!(
            estimate(1e200, 0.0, 1e200, 1500.0),
            Err(MarketplaceError::InvalidInput {
                field: "potential_profit",
                ..
            })
        ));
        assert!(matches!(
            estimate(1e150, 0.0, 1e150, 1e-300),
            Err(MarketplaceError::InvalidInput {
                field: "roi_percentage",
                ..
            })
        ));
    }

    #[test]
    fn request_investment_overrides_estimator_default() {
        let estimator = RoiEstimator::default();
        let request = RoiRequest {
            waste_type: Some("Borra Oleosa".to_string()),
            volume: 10.0,
            disposal_cost: 0.0,
            market_price: 10.0,
            fixed_investment: Some(3000.0),
        };

        let estimate = estimator.evaluate(request).expect("valid request");

        assert_eq!(estimate.waste_type.as_deref(), Some("Borra Oleosa"));
        assert_eq!(estimate.fixed_investment, 3000.0);
        assert_eq!(estimate.payback_days, 900);
        assert_eq!(estimate.roi_percentage, 3.3);
    }
}
