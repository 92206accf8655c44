//! Runs every variant of a scenario and records the outcome.

use crate::result::{ComparisonReport, ComparisonRow};
use crate::scenario::{Scenario, Variant};
use sheetcut_core::{GaConfig, OptimizeResult, Optimizer};
use sheetcut_guillotine::CutOptimizer;
use std::time::Instant;

/// Configuration for comparison runs.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Fixed GA configuration; `None` scales it to each job.
    pub ga_config: Option<GaConfig>,
    /// Whether to print progress lines.
    pub show_progress: bool,
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ga_config(mut self, config: GaConfig) -> Self {
        self.ga_config = Some(config);
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

/// Scenario runner. Each variant gets its own optimizer instance.
pub struct ScenarioRunner {
    config: RunnerConfig,
}

impl ScenarioRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Runs the scenario's own variants.
    pub fn run(&self, scenario: &Scenario) -> ComparisonReport {
        self.run_variants(scenario, &scenario.effective_variants())
    }

    /// Runs `variants` against the scenario's cut list.
    pub fn run_variants(&self, scenario: &Scenario, variants: &[Variant]) -> ComparisonReport {
        let mut report = ComparisonReport::new(scenario.name.clone());

        if self.config.show_progress {
            println!("\nScenario: {}", scenario.name);
            println!("  Part types: {}", scenario.parts.len());
            println!("  Stock types: {}", scenario.stocks.len());
            println!("  Variants: {}", variants.len());
        }

        for variant in variants {
            let (row, _) = self.run_variant(scenario, variant);

            if self.config.show_progress {
                println!(
                    "  {}: sheets={}, unplaced={}, efficiency={:.1}%, time={}ms",
                    row.variant,
                    row.sheets_used,
                    row.unplaced,
                    row.efficiency * 100.0,
                    row.time_ms
                );
            }
            report.add_row(row);
        }

        report
    }

    /// Runs one variant, returning its row and the full layout.
    pub fn run_variant(
        &self,
        scenario: &Scenario,
        variant: &Variant,
    ) -> (ComparisonRow, OptimizeResult) {
        let settings = scenario.settings_for(variant);
        let seed = scenario.seed_for(variant);

        let mut optimizer = CutOptimizer::new(settings.clone()).with_seed(seed);
        if let Some(config) = &self.config.ga_config {
            optimizer = optimizer.with_ga_config(config.clone());
        }

        log::debug!(
            "running '{}' / '{}' with {:?}, seed {}",
            scenario.name,
            variant.name,
            settings.algorithm,
            seed
        );

        let start = Instant::now();
        let result = optimizer.optimize(&scenario.parts, &scenario.stocks);
        let time_ms = start.elapsed().as_millis() as u64;

        let row = ComparisonRow {
            scenario: scenario.name.clone(),
            variant: variant.name.clone(),
            algorithm: settings.algorithm.name().to_string(),
            kerf_width: settings.kerf_width,
            edge_trim: settings.edge_trim,
            seed,
            sheets_used: result.sheets_used(),
            placed: result.placed_count(),
            unplaced: result.unplaced_count(),
            efficiency: result.efficiency(),
            waste_area: result.waste_area(),
            total_cost: result.total_cost(),
            best_fitness: result.best_fitness,
            time_ms,
        };

        (row, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::sweep;
    use sheetcut_core::{Algorithm, CutSettings, Part, StockSheet};

    fn scenario() -> Scenario {
        Scenario::new(
            "shelving",
            vec![
                Part::new("upright", 1800.0, 300.0).with_quantity(2),
                Part::new("shelf", 764.0, 300.0).with_quantity(5),
            ],
            vec![StockSheet::new("birch", 2440.0, 1220.0)
                .with_quantity(3)
                .with_price(60.0)],
        )
        .with_settings(CutSettings::new().with_kerf(3.0))
    }

    fn quick_runner() -> ScenarioRunner {
        ScenarioRunner::new(
            RunnerConfig::new().with_ga_config(
                GaConfig::default()
                    .with_population_size(8)
                    .with_generations(5),
            ),
        )
    }

    #[test]
    fn test_base_variant() {
        let report = quick_runner().run(&scenario());
        assert_eq!(report.rows.len(), 1);

        let row = &report.rows[0];
        assert_eq!(row.variant, "base");
        assert_eq!(row.algorithm, "Greedy");
        assert_eq!(row.placed + row.unplaced, 7);
        assert_eq!(row.unplaced, 0);
        assert_eq!(row.total_cost, 60.0 * row.sheets_used as f64);
        assert!(row.best_fitness.is_none());
    }

    #[test]
    fn test_sweep_runs_every_combination() {
        let variants = sweep(&[3.0, 4.0], &[0.0, 10.0], &[Algorithm::Greedy, Algorithm::Genetic]);
        let report = quick_runner().run_variants(&scenario(), &variants);

        assert_eq!(report.rows.len(), 8);
        for row in &report.rows {
            assert_eq!(row.placed + row.unplaced, 7);
            assert_eq!(row.best_fitness.is_some(), row.algorithm == "Genetic");
        }
        assert_eq!(report.rows[5].kerf_width, 4.0);
        assert_eq!(report.rows[5].edge_trim, 0.0);
    }

    #[test]
    fn test_variant_seed_reaches_optimizer() {
        let scenario = scenario();
        let runner = quick_runner();
        let variant = Variant::new("ga")
            .with_algorithm(Algorithm::Genetic)
            .with_seed(99);

        let (row, first) = runner.run_variant(&scenario, &variant);
        let (_, second) = runner.run_variant(&scenario, &variant);
        assert_eq!(row.seed, 99);
        assert_eq!(first, second);
    }
}
