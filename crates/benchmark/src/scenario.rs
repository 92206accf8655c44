//! Scenario definitions: one cut list, several settings variants.
//!
//! A scenario file is JSON:
//!
//! ```json
//! {
//!   "name": "kitchen-base",
//!   "settings": { "kerf_width": 3.0, "edge_trim": 10.0 },
//!   "parts": [{ "id": "side", "width": 720, "height": 560, "quantity": 2 }],
//!   "stocks": [{ "id": "birch", "width": 2440, "height": 1220, "quantity": 3 }],
//!   "variants": [
//!     { "name": "thin-blade", "kerf_width": 2.0 },
//!     { "name": "genetic", "algorithm": "Genetic", "seed": 7 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use sheetcut_core::{Algorithm, CutSettings, Part, StockSheet, DEFAULT_SEED};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scenario: {0}")]
    Invalid(String),
}

/// A named override of the base settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Label shown in reports.
    pub name: String,
    #[serde(default)]
    pub kerf_width: Option<f64>,
    #[serde(default)]
    pub edge_trim: Option<f64>,
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_kerf(mut self, kerf: f64) -> Self {
        self.kerf_width = Some(kerf);
        self
    }

    pub fn with_edge_trim(mut self, trim: f64) -> Self {
        self.edge_trim = Some(trim);
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A cut list with the settings variants to compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base settings every variant starts from.
    #[serde(default)]
    pub settings: CutSettings,
    pub parts: Vec<Part>,
    pub stocks: Vec<StockSheet>,
    /// Seed for genetic runs whose variant sets none.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Variants to run. An empty list runs the base settings once.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Scenario {
    /// Creates a scenario with default settings and no variants.
    pub fn new(name: impl Into<String>, parts: Vec<Part>, stocks: Vec<StockSheet>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            settings: CutSettings::default(),
            parts,
            stocks,
            seed: None,
            variants: Vec::new(),
        }
    }

    pub fn with_settings(mut self, settings: CutSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        self.variants = variants;
        self
    }

    /// Loads and validates a scenario from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses and validates a scenario from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks the cut list, the stock and every variant's settings.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.parts.is_empty() {
            return Err(ScenarioError::Invalid(format!(
                "scenario '{}' has no parts",
                self.name
            )));
        }
        if self.stocks.is_empty() {
            return Err(ScenarioError::Invalid(format!(
                "scenario '{}' has no stock",
                self.name
            )));
        }

        let invalid = |e: sheetcut_core::Error| ScenarioError::Invalid(e.to_string());
        for part in &self.parts {
            part.validate().map_err(invalid)?;
        }
        for stock in &self.stocks {
            stock.validate().map_err(invalid)?;
        }
        for variant in self.effective_variants() {
            self.settings_for(&variant).validate().map_err(invalid)?;
        }
        Ok(())
    }

    /// The variants to run: the declared ones, or a single `base` variant.
    pub fn effective_variants(&self) -> Vec<Variant> {
        if self.variants.is_empty() {
            vec![Variant::new("base")]
        } else {
            self.variants.clone()
        }
    }

    /// Base settings with the variant's overrides applied.
    pub fn settings_for(&self, variant: &Variant) -> CutSettings {
        let mut settings = self.settings.clone();
        if let Some(kerf) = variant.kerf_width {
            settings.kerf_width = kerf;
        }
        if let Some(trim) = variant.edge_trim {
            settings.edge_trim = trim;
        }
        if let Some(algorithm) = variant.algorithm {
            settings.algorithm = algorithm;
        }
        settings
    }

    /// Seed for the variant: its own, the scenario's, or [`DEFAULT_SEED`].
    pub fn seed_for(&self, variant: &Variant) -> u64 {
        variant.seed.or(self.seed).unwrap_or(DEFAULT_SEED)
    }
}

/// Every combination of the given kerfs, trims and algorithms.
///
/// An empty list leaves that setting at the scenario's base value.
pub fn sweep(kerfs: &[f64], trims: &[f64], algorithms: &[Algorithm]) -> Vec<Variant> {
    fn axis<T: Copy>(values: &[T]) -> Vec<Option<T>> {
        if values.is_empty() {
            vec![None]
        } else {
            values.iter().copied().map(Some).collect()
        }
    }

    let mut variants = Vec::new();
    for kerf in axis(kerfs) {
        for trim in axis(trims) {
            for algorithm in axis(algorithms) {
                let mut label = Vec::new();
                if let Some(k) = kerf {
                    label.push(format!("kerf={}", k));
                }
                if let Some(t) = trim {
                    label.push(format!("trim={}", t));
                }
                if let Some(a) = algorithm {
                    label.push(a.name().to_lowercase());
                }
                let name = if label.is_empty() {
                    "base".to_string()
                } else {
                    label.join(" ")
                };

                variants.push(Variant {
                    name,
                    kerf_width: kerf,
                    edge_trim: trim,
                    algorithm,
                    seed: None,
                });
            }
        }
    }
    variants
}
