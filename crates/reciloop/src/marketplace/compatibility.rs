use std::collections::HashMap;

/// Coefficient applied when a waste/consumer pairing has no recorded compatibility.
pub const DEFAULT_COMPATIBILITY: f64 = 0.7;

/// Source of material compatibility coefficients in `[0, 1]`, keyed by waste name and
/// consumer company name.
pub trait CompatibilitySource: Send + Sync {
    fn coefficient(&self, waste_name: &str, consumer_name: &str) -> Option<f64>;
}

/// Lookup table of known-good pairings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatibilityTable {
    pairs: HashMap<(String, String), f64>,
}

impl CompatibilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairings observed in the Suape industrial complex pilot.
    pub fn demo() -> Self {
        [
            ("Borra Oleosa", "Cimpor Suape", 0.98),
            ("Catalisador FCC Exausto", "Cimpor Suape", 0.85),
            ("Lodo de ETE Industrial", "Bunge Alimentos", 0.75),
            ("Resíduos de PET", "Mossi & Ghisolfi", 0.95),
            ("Óleo de Soja Usado", "Termopernambuco", 0.88),
            ("Sucata Metálica Naval", "White Martins", 0.82),
            ("Cinzas de Caldeira", "Cimpor Suape", 0.90),
            ("CO2 Industrial", "PetroquímicaSuape", 0.92),
        ]
        .into_iter()
        .fold(Self::new(), |table, (waste, consumer, coefficient)| {
            table.with_pair(waste, consumer, coefficient)
        })
    }

    /// Record a pairing; the coefficient is clamped into `[0, 1]`.
    pub fn with_pair(
        mut self,
        waste_name: impl Into<String>,
        consumer_name: impl Into<String>,
        coefficient: f64,
    ) -> Self {
        self.insert(waste_name, consumer_name, coefficient);
        self
    }

    pub fn insert(
        &mut self,
        waste_name: impl Into<String>,
        consumer_name: impl Into<String>,
        coefficient: f64,
    ) {
        self.pairs.insert(
            (waste_name.into(), consumer_name.into()),
            clamp_unit(coefficient),
        );
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl CompatibilitySource for CompatibilityTable {
    fn coefficient(&self, waste_name: &str, consumer_name: &str) -> Option<f64> {
        self.pairs
            .get(&(waste_name.to_string(), consumer_name.to_string()))
            .copied()
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
