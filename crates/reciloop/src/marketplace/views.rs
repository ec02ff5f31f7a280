use serde::{Deserialize, Serialize};

use super::domain::CompanyId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySavings {
    pub month: String,
    pub savings: f64,
}

/// Headline figures for the marketplace dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_savings: f64,
    pub co2_avoided: f64,
    pub matches_completed: u32,
    pub materials_moved: f64,
    pub monthly_trend: Vec<MonthlySavings>,
}

impl DashboardStats {
    /// First-semester figures reported by the pilot.
    pub fn demo() -> Self {
        let monthly_trend = [
            ("Jan", 180_000.0),
            ("Fev", 220_000.0),
            ("Mar", 350_000.0),
            ("Abr", 410_000.0),
            ("Mai", 520_000.0),
            ("Jun", 720_000.0),
        ]
        .into_iter()
        .map(|(month, savings)| MonthlySavings {
            month: month.to_string(),
            savings,
        })
        .collect();

        Self {
            total_savings: 2_400_000.0,
            co2_avoided: 1234.0,
            matches_completed: 156,
            materials_moved: 2850.0,
            monthly_trend,
        }
    }
}

/// Circular-economy standing of one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgRankingEntry {
    pub position: u32,
    pub company_id: CompanyId,
    pub company_name: String,
    pub circular_score: f64,
    pub transactions_count: u32,
    pub total_savings: f64,
    pub co2_avoided: f64,
}

pub fn esg_ranking() -> Vec<EsgRankingEntry> {
    [
        (2, "Cimpor", 95.2, 48, 850_000.0, 420.0),
        (3, "Braskem", 88.7, 35, 620_000.0, 310.0),
        (1, "Petrobras", 82.4, 42, 720_000.0, 380.0),
        (4, "LafargeHolcim", 76.9, 31, 480_000.0, 250.0),
        (6, "Termopernambuco", 71.3, 28, 390_000.0, 195.0),
    ]
    .into_iter()
    .zip(1..)
    .map(
        |((company_id, name, circular_score, transactions_count, total_savings, co2_avoided), position)| {
            EsgRankingEntry {
                position,
                company_id: CompanyId(company_id),
                company_name: name.to_string(),
                circular_score,
                transactions_count,
                total_savings,
                co2_avoided,
            }
        },
    )
    .collect()
}
