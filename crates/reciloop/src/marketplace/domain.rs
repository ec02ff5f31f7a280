use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for participating companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub u32);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for listed waste lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WasteLotId(pub u32);

impl fmt::Display for WasteLotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a company takes part in the exchange. The Portuguese labels used by the
/// Suape pilot exports are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyRole {
    #[serde(alias = "geradora")]
    Generator,
    #[serde(alias = "consumidora")]
    Consumer,
    #[serde(alias = "ambas")]
    Both,
}

impl CompanyRole {
    pub const fn label(self) -> &'static str {
        match self {
            CompanyRole::Generator => "generator",
            CompanyRole::Consumer => "consumer",
            CompanyRole::Both => "both",
        }
    }

    pub const fn consumes(self) -> bool {
        matches!(self, CompanyRole::Consumer | CompanyRole::Both)
    }
}

/// Reference record for a marketplace participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(alias = "type")]
    pub role: CompanyRole,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Company {
    pub fn can_consume(&self) -> bool {
        self.role.consumes()
    }
}

/// A listed lot of industrial waste offered by its generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteLot {
    pub id: WasteLotId,
    pub name: String,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub price_per_unit: f64,
    pub company_id: CompanyId,
    #[serde(default = "default_available")]
    pub available: bool,
    pub category: String,
}

fn default_available() -> bool {
    true
}

impl WasteLot {
    /// Full market value of the lot at the listed unit price.
    pub fn market_value(&self) -> f64 {
        self.quantity * self.price_per_unit
    }

    pub fn validate(&self) -> Result<(), MarketplaceError> {
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(MarketplaceError::InvalidInput {
                field: "quantity",
                value: self.quantity,
            });
        }
        ensure_non_negative("price_per_unit", self.price_per_unit)
    }
}

/// Lifecycle of a proposed match as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Accepted,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
        }
    }
}

/// Local validation failures raised by the matching and ROI core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarketplaceError {
    #[error("waste lot {waste_id} references unknown company {company_id}")]
    DataIntegrity {
        waste_id: WasteLotId,
        company_id: CompanyId,
    },
    #[error("{field} is out of range (got {value})")]
    InvalidInput { field: &'static str, value: f64 },
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), MarketplaceError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MarketplaceError::InvalidInput { field, value })
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), MarketplaceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MarketplaceError::InvalidInput { field, value })
    }
}
