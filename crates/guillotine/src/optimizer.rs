//! Algorithm dispatch and the top-level entry points.

use sheetcut_core::{
    Algorithm, CutSettings, GaConfig, OptimizeResult, Optimizer, Part, StockSheet, DEFAULT_SEED,
};

use crate::genetic::GeneticOptimizer;
use crate::greedy::GreedyOptimizer;

/// Runs the algorithm named in [`CutSettings::algorithm`].
#[derive(Debug, Clone)]
pub struct CutOptimizer {
    settings: CutSettings,
    seed: u64,
    ga_config: Option<GaConfig>,
}

impl CutOptimizer {
    pub fn new(settings: CutSettings) -> Self {
        Self {
            settings,
            seed: DEFAULT_SEED,
            ga_config: None,
        }
    }

    /// Seed for the genetic algorithm. Ignored by the greedy optimizer.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fixed GA configuration instead of the size-scaled default.
    pub fn with_ga_config(mut self, config: GaConfig) -> Self {
        self.ga_config = Some(config);
        self
    }

    pub fn settings(&self) -> &CutSettings {
        &self.settings
    }

    fn genetic(&self) -> GeneticOptimizer {
        let optimizer = GeneticOptimizer::new(self.settings.clone(), self.seed);
        match &self.ga_config {
            Some(config) => optimizer.with_ga_config(config.clone()),
            None => optimizer,
        }
    }
}

impl Optimizer for CutOptimizer {
    fn optimize(&self, parts: &[Part], stocks: &[StockSheet]) -> OptimizeResult {
        match self.settings.algorithm {
            Algorithm::Greedy => GreedyOptimizer::new(self.settings.clone()).optimize(parts, stocks),
            Algorithm::Genetic => self.genetic().optimize(parts, stocks),
        }
    }

    fn name(&self) -> &'static str {
        self.settings.algorithm.name()
    }
}

/// Lays out `parts` on `stocks` with the algorithm selected in `settings`.
/// The genetic algorithm runs with [`DEFAULT_SEED`].
pub fn optimize(settings: &CutSettings, parts: &[Part], stocks: &[StockSheet]) -> OptimizeResult {
    CutOptimizer::new(settings.clone()).optimize(parts, stocks)
}

/// Lays out `parts` on `stocks` with the genetic algorithm and the given
/// seed, whatever algorithm `settings` names.
pub fn optimize_genetic(
    settings: &CutSettings,
    parts: &[Part],
    stocks: &[StockSheet],
    seed: u64,
) -> OptimizeResult {
    GeneticOptimizer::new(settings.clone(), seed).optimize(parts, stocks)
}
