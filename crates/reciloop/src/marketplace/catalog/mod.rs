//! Reference data for the marketplace: participating companies and their listed waste lots.

mod importer;
mod seed;

pub use importer::{CatalogImportError, CatalogImporter};

use super::domain::{Company, CompanyId, WasteLot};

/// Snapshot of companies and waste lots that core operations read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketplaceCatalog {
    companies: Vec<Company>,
    wastes: Vec<WasteLot>,
}

impl MarketplaceCatalog {
    pub fn new(companies: Vec<Company>, wastes: Vec<WasteLot>) -> Self {
        Self { companies, wastes }
    }

    /// Participants and listings from the Suape industrial port pilot.
    pub fn demo() -> Self {
        Self::new(seed::companies(), seed::wastes())
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn wastes(&self) -> &[WasteLot] {
        &self.wastes
    }

    pub fn company(&self, id: CompanyId) -> Option<&Company> {
        self.companies.iter().find(|company| company.id == id)
    }

    pub fn push_waste(&mut self, waste: WasteLot) {
        self.wastes.push(waste);
    }

    pub fn push_company(&mut self, company: Company) {
        self.companies.push(company);
    }
}
