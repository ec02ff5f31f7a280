use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Company, CompanyId, MarketplaceError, WasteLot};

/// Number of prospective consumers listed per lot.
const INTERESTED_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatus {
    Available,
    Reserved,
}

impl InventoryStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InventoryStatus::Available => "available",
            InventoryStatus::Reserved => "reserved",
        }
    }
}

/// Live view of one listed lot with the consumers that could take it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub waste: WasteLot,
    pub company: Company,
    pub interested_companies: Vec<String>,
    pub last_update: DateTime<Utc>,
    pub status: InventoryStatus,
}

pub fn inventory_snapshot(
    wastes: &[WasteLot],
    companies: &[Company],
    as_of: DateTime<Utc>,
) -> Result<Vec<InventoryEntry>, MarketplaceError> {
    wastes
        .iter()
        .map(|waste| -> Result<InventoryEntry, MarketplaceError> {
            let owner = companies
                .iter()
                .find(|company| company.id == waste.company_id)
                .ok_or(MarketplaceError::DataIntegrity {
                    waste_id: waste.id,
                    company_id: waste.company_id,
                })?;

            Ok(InventoryEntry {
                waste: waste.clone(),
                company: owner.clone(),
                interested_companies: interested_consumers(companies, waste.company_id),
                last_update: as_of,
                status: if waste.available {
                    InventoryStatus::Available
                } else {
                    InventoryStatus::Reserved
                },
            })
        })
        .collect()
}

fn interested_consumers(companies: &[Company], owner: CompanyId) -> Vec<String> {
    let mut seen = HashSet::new();
    companies
        .iter()
        .filter(|company| company.id != owner && company.can_consume())
        .filter(|company| seen.insert(company.id))
        .take(INTERESTED_LIMIT)
        .map(|company| company.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::catalog::MarketplaceCatalog;
    use crate::marketplace::domain::WasteLotId;
    use chrono::TimeZone;

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn lists_two_interested_consumers_excluding_owner() {
        let catalog = MarketplaceCatalog::demo();

        let inventory =
            inventory_snapshot(catalog.wastes(), catalog.companies(), as_of()).expect("snapshot");

        assert_eq!(inventory.len(), catalog.wastes().len());
        let pet = inventory
            .iter()
            .find(|entry| entry.waste.name == "Resíduos de PET")
            .expect("PET listed");
        assert_eq!(pet.company.name, "PetroquímicaSuape");
        assert_eq!(
            pet.interested_companies,
            vec!["Cimpor Suape".to_string(), "Bunge Alimentos".to_string()]
        );
        assert_eq!(pet.last_update, as_of());
        assert_eq!(pet.status, InventoryStatus::Available);
    }

    #[test]
    fn unavailable_lots_are_reserved() {
        let mut catalog = MarketplaceCatalog::demo();
        let mut reserved = catalog.wastes()[0].clone();
        reserved.id = WasteLotId(42);
        reserved.available = false;
        catalog.push_waste(reserved);

        let inventory =
            inventory_snapshot(catalog.wastes(), catalog.companies(), as_of()).expect("snapshot");

        let entry = inventory
            .iter()
            .find(|entry| entry.waste.id == WasteLotId(42))
            .expect("reserved lot listed");
        assert_eq!(entry.status, InventoryStatus::Reserved);
    }

    #[test]
    fn orphaned_lot_fails_snapshot() {
        let mut catalog = MarketplaceCatalog::demo();
        let mut orphan = catalog.wastes()[0].clone();
        orphan.company_id = CompanyId(77);
        catalog.push_waste(orphan);

        let err = inventory_snapshot(catalog.wastes(), catalog.companies(), as_of())
            .expect_err("orphan rejected");
        assert!(matches!(err, MarketplaceError::DataIntegrity { .. }));
    }
}
