use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::MarketplaceCatalog;
use crate::marketplace::domain::{Company, MarketplaceError, WasteLot};

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow {
        row: usize,
        source: MarketplaceError,
    },
    DuplicateId {
        kind: &'static str,
        id: u32,
    },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::InvalidRow { row, source } => {
                write!(f, "row {} rejected: {}", row, source)
            }
            CatalogImportError::DuplicateId { kind, id } => {
                write!(f, "duplicate {} id {}", kind, id)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidRow { source, .. } => Some(source),
            CatalogImportError::DuplicateId { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads company and waste-lot exports with headers matching the record field names
/// (`id,name,role,logo` and `id,name,description,quantity,unit,price_per_unit,company_id,available,category`).
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_paths<P: AsRef<Path>, Q: AsRef<Path>>(
        companies: P,
        wastes: Q,
    ) -> Result<MarketplaceCatalog, CatalogImportError> {
        let companies = Self::companies_from_reader(std::fs::File::open(companies)?)?;
        let wastes = Self::wastes_from_reader(std::fs::File::open(wastes)?)?;

        info!(
            companies = companies.len(),
            wastes = wastes.len(),
            "imported marketplace catalog"
        );

        Ok(MarketplaceCatalog::new(companies, wastes))
    }

    pub fn companies_from_reader<R: Read>(reader: R) -> Result<Vec<Company>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut seen = HashSet::new();
        let mut companies = Vec::new();

        for record in csv_reader.deserialize::<Company>() {
            let company = record?;
            if !seen.insert(company.id) {
                return Err(CatalogImportError::DuplicateId {
                    kind: "company",
                    id: company.id.0,
                });
            }
            companies.push(company);
        }

        Ok(companies)
    }

    pub fn wastes_from_reader<R: Read>(reader: R) -> Result<Vec<WasteLot>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut seen = HashSet::new();
        let mut wastes = Vec::new();

        for (index, record) in csv_reader.deserialize::<WasteLot>().enumerate() {
            let waste = record?;
            // header occupies line 1
            waste
                .validate()
                .map_err(|source| CatalogImportError::InvalidRow {
                    row: index + 2,
                    source,
                })?;
            if !seen.insert(waste.id) {
                return Err(CatalogImportError::DuplicateId {
                    kind: "waste lot",
                    id: waste.id.0,
                });
            }
            wastes.push(waste);
        }

        Ok(wastes)
    }
}
