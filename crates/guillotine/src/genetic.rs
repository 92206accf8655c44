//! Genetic optimizer over packing order and rotation.
//!
//! Each unit of every part is one gene `(unit, rotated)`. A chromosome is
//! decoded by laying the units out in gene order with the shared sheet-by-sheet
//! procedure, trying the requested orientation first. Rotation flags on
//! grained parts are tolerated in the genome and re-checked when decoding.
//!
//! Individual 0 of the initial population is the area-descending, unrotated
//! order, which decodes to exactly the greedy layout; elitism keeps the best
//! fitness from ever dropping below it.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use rand::prelude::*;
use sheetcut_core::{
    Algorithm, Chromosome, CutSettings, GaConfig, GaProblem, GaRunner, Gene, Individual,
    OptimizeResult, Optimizer, Part, SheetResult, StockSheet, DEFAULT_SEED,
};

use crate::layout::{area_descending_order, expand_parts, pack_in_order, PartUnit};

/// Penalty per unplaced unit.
const UNPLACED_PENALTY: f64 = 0.1;

/// Penalty per sheet beyond the first.
const EXTRA_SHEET_PENALTY: f64 = 0.05;

/// Scores a decoded layout: `max(0, efficiency - 0.1·unplaced - 0.05·(sheets-1))`.
///
/// `efficiency` is the sum of the per-sheet efficiencies, so every sheet
/// that carries parts adds to the score. Placing every part dominates, then
/// using fewer sheets, then wasting less.
pub fn layout_fitness(result: &OptimizeResult) -> f64 {
    let extra_sheets = result.sheets_used().saturating_sub(1) as f64;
    let efficiency: f64 = result.sheets.iter().map(SheetResult::efficiency).sum();
    let score = efficiency
        - UNPLACED_PENALTY * result.unplaced_count() as f64
        - EXTRA_SHEET_PENALTY * extra_sheets;
    score.max(0.0)
}

/// The cutting-stock problem as seen by the GA runner.
pub struct CuttingProblem<'a> {
    settings: &'a CutSettings,
    parts: &'a [Part],
    stocks: &'a [StockSheet],
    units: Vec<PartUnit>,
    can_rotate: Vec<bool>,
    mutation_rate: f64,
}

impl<'a> CuttingProblem<'a> {
    pub fn new(settings: &'a CutSettings, parts: &'a [Part], stocks: &'a [StockSheet]) -> Self {
        let units = expand_parts(parts);
        let can_rotate = units
            .iter()
            .map(|unit| parts[unit.part_index].grain().is_unconstrained())
            .collect();

        Self {
            settings,
            parts,
            stocks,
            units,
            can_rotate,
            mutation_rate: GaConfig::default().mutation_rate,
        }
    }

    /// Sets the probability of each mutation check, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Number of expanded units (genes per chromosome).
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// The area-descending, unrotated chromosome.
    pub fn greedy_chromosome(&self) -> Chromosome {
        Chromosome::new(
            area_descending_order(&self.units, self.parts)
                .into_iter()
                .map(|unit| Gene::new(unit, false))
                .collect(),
        )
    }

    /// Lays out the chromosome's units in gene order.
    pub fn decode(&self, chromosome: &Chromosome) -> OptimizeResult {
        let sequence: Vec<(usize, bool)> = chromosome
            .genes()
            .iter()
            .map(|gene| (self.units[gene.part_index].part_index, gene.rotated))
            .collect();
        pack_in_order(self.settings, self.parts, self.stocks, &sequence)
    }
}

impl GaProblem for CuttingProblem<'_> {
    type Individual = Chromosome;

    fn initialize_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        let mut population: Vec<Chromosome> = (0..size)
            .map(|_| Chromosome::random(&self.can_rotate, rng))
            .collect();

        if let Some(first) = population.first_mut() {
            *first = self.greedy_chromosome();
        }
        population
    }

    fn evaluate(&self, individual: &mut Chromosome) {
        let fitness = layout_fitness(&self.decode(individual));
        individual.set_fitness(fitness);
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Chromosome {
        parent1.order_crossover(parent2, rng)
    }

    fn mutate<R: Rng>(&self, individual: &mut Chromosome, rng: &mut R) {
        individual.mutate(self.mutation_rate, &self.can_rotate, rng);
    }

    fn on_generation(&self, generation: u32, best: &Chromosome, _population: &[Chromosome]) {
        if log::log_enabled!(log::Level::Debug) {
            let layout = self.decode(best);
            log::debug!(
                "generation {}: best fitness {:.4}, {} sheets, {} unplaced",
                generation,
                best.fitness(),
                layout.sheets_used(),
                layout.unplaced_count()
            );
        }
    }
}

/// Genetic optimizer with an explicit seed.
///
/// Two runs with the same seed, settings and inputs return identical
/// results.
#[derive(Debug, Clone)]
pub struct GeneticOptimizer {
    settings: CutSettings,
    seed: u64,
    ga_config: Option<GaConfig>,
    cancelled: Arc<AtomicBool>,
}

impl GeneticOptimizer {
    /// Creates an optimizer seeded with `seed`. The GA configuration is
    /// scaled to the input size unless set with [`with_ga_config`].
    ///
    /// [`with_ga_config`]: GeneticOptimizer::with_ga_config
    pub fn new(settings: CutSettings, seed: u64) -> Self {
        Self {
            settings,
            seed,
            ga_config: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates an optimizer seeded with [`DEFAULT_SEED`].
    pub fn with_default_seed(settings: CutSettings) -> Self {
        Self::new(settings, DEFAULT_SEED)
    }

    /// Uses a fixed GA configuration instead of the size-scaled default.
    pub fn with_ga_config(mut self, config: GaConfig) -> Self {
        self.ga_config = Some(config);
        self
    }

    pub fn settings(&self) -> &CutSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Flag that stops a running optimization at the next generation
    /// boundary. The best individual found so far is still decoded.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    fn config_for(&self, units: usize) -> GaConfig {
        self.ga_config
            .clone()
            .unwrap_or_else(|| GaConfig::scaled_for(units))
    }
}

impl Optimizer for GeneticOptimizer {
    fn optimize(&self, parts: &[Part], stocks: &[StockSheet]) -> OptimizeResult {
        let problem = CuttingProblem::new(&self.settings, parts, stocks);
        let units = problem.unit_count();

        if units == 0 || stocks.is_empty() {
            if units > 0 {
                log::warn!("no stock sheets given; {} units unplaced", units);
            }
            let mut result = OptimizeResult::new().with_algorithm(self.name());
            result.unplaced = problem
                .units
                .iter()
                .map(|unit| parts[unit.part_index].clone())
                .collect();
            return result;
        }

        let config = self.config_for(units);
        let problem = problem.with_mutation_rate(config.mutation_rate);

        let runner =
            GaRunner::new(config, problem).with_cancel_flag(self.cancel_handle());
        let mut rng = StdRng::seed_from_u64(self.seed);
        let ga = runner.run_with_rng(&mut rng);

        if ga.cancelled {
            log::warn!("genetic optimization cancelled after {} generations", ga.generations);
        }

        let mut result = runner.problem().decode(&ga.best).with_algorithm(self.name());
        result.best_fitness = Some(ga.best.fitness());
        result.generations = Some(ga.generations);
        result.fitness_history = Some(ga.history);

        if !result.all_placed() {
            log::warn!("{} of {} units could not be placed", result.unplaced_count(), units);
        }
        log::info!(
            "genetic: {} units on {} sheets, efficiency {}, fitness {:.4} after {} generations",
            result.placed_count(),
            result.sheets_used(),
            result.efficiency_percent(),
            ga.best.fitness(),
            ga.generations
        );
        result
    }

    fn name(&self) -> &'static str {
        Algorithm::Genetic.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GreedyOptimizer;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use sheetcut_core::{Grain, SheetResult, Placement};
    use std::sync::atomic::Ordering;

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(12)
            .with_generations(10)
    }

    fn cabinet_parts() -> Vec<Part> {
        vec![
            Part::new("side", 720.0, 560.0).with_quantity(2),
            Part::new("shelf", 764.0, 540.0).with_quantity(2),
            Part::new("door", 715.0, 396.0).with_quantity(2),
            Part::new("rail", 764.0, 100.0).with_quantity(3),
        ]
    }

    #[test]
    fn test_fitness_formula() {
        let mut sheet = SheetResult::new(StockSheet::new("S", 100.0, 100.0));
        sheet
            .placements
            .push(Placement::new(Part::new("A", 80.0, 100.0), 0.0, 0.0, false));
        let mut result = OptimizeResult::new();
        result.sheets.push(sheet.clone());
        assert_relative_eq!(layout_fitness(&result), 0.8);

        result.sheets.push(sheet);
        assert_relative_eq!(layout_fitness(&result), 1.55);

        result.unplaced = vec![Part::new("X", 1.0, 1.0); 20];
        assert_eq!(layout_fitness(&result), 0.0);
    }

    fn sheet_holding(widths: &[f64]) -> SheetResult {
        let mut sheet = SheetResult::new(StockSheet::new("S", 100.0, 100.0));
        for (i, &w) in widths.iter().enumerate() {
            sheet
                .placements
                .push(Placement::new(Part::new(format!("P{}", i), w, 100.0), 0.0, 0.0, false));
        }
        sheet
    }

    #[test]
    fn test_placing_everything_beats_saving_a_sheet() {
        // Two sheets at 60% and 20%, nothing left over.
        let mut spread = OptimizeResult::new();
        spread.sheets = vec![sheet_holding(&[60.0]), sheet_holding(&[20.0])];

        // One sheet at 80% with a unit left over.
        let mut packed = OptimizeResult::new();
        packed.sheets = vec![sheet_holding(&[60.0, 20.0])];
        packed.unplaced = vec![Part::new("X", 20.0, 100.0)];

        assert_relative_eq!(layout_fitness(&spread), 0.75);
        assert_relative_eq!(layout_fitness(&packed), 0.7);
        assert!(layout_fitness(&spread) > layout_fitness(&packed));
    }

    #[test]
    fn test_mutation_rate_is_clamped() {
        let settings = CutSettings::default();
        let parts = cabinet_parts();
        let stocks = vec![StockSheet::new("S", 2440.0, 1220.0)];

        let problem = CuttingProblem::new(&settings, &parts, &stocks).with_mutation_rate(3.0);
        assert_eq!(problem.mutation_rate, 1.0);
        let problem = problem.with_mutation_rate(-1.0);
        assert_eq!(problem.mutation_rate, 0.0);
    }

    #[test]
    fn test_initial_population_seeds_greedy_order() {
        let settings = CutSettings::default();
        let parts = cabinet_parts();
        let stocks = vec![StockSheet::new("S", 2440.0, 1220.0).with_quantity(4)];
        let problem = CuttingProblem::new(&settings, &parts, &stocks);

        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        let population = problem.initialize_population(5, &mut rng);
        assert_eq!(population.len(), 5);
        assert_eq!(population[0], problem.greedy_chromosome());
        assert!(population.iter().all(Chromosome::is_permutation));
    }

    #[test]
    fn test_greedy_chromosome_decodes_to_greedy_layout() {
        let settings = CutSettings::new().with_kerf(3.0);
        let parts = cabinet_parts();
        let stocks = vec![StockSheet::new("S", 2440.0, 1220.0).with_quantity(4)];
        let problem = CuttingProblem::new(&settings, &parts, &stocks);

        let decoded = problem.decode(&problem.greedy_chromosome());
        let greedy = GreedyOptimizer::new(settings.clone()).optimize(&parts, &stocks);
        assert_eq!(decoded.sheets, greedy.sheets);
        assert_eq!(decoded.unplaced, greedy.unplaced);
    }

    #[test]
    fn test_grained_rotation_flag_is_ignored() {
        let settings = CutSettings::default();
        let parts = vec![Part::new("P", 800.0, 400.0).with_grain(Grain::Horizontal)];
        let stocks = vec![StockSheet::new("S", 1000.0, 1000.0)];
        let problem = CuttingProblem::new(&settings, &parts, &stocks);

        let layout = problem.decode(&Chromosome::new(vec![Gene::new(0, true)]));
        assert!(!layout.sheets[0].placements[0].rotated);
    }

    #[test]
    fn test_records_run_metadata() {
        let result = GeneticOptimizer::new(CutSettings::default(), 7)
            .with_ga_config(small_config())
            .optimize(&cabinet_parts(), &[StockSheet::new("S", 2440.0, 1220.0).with_quantity(4)]);

        assert_eq!(result.algorithm.as_deref(), Some("Genetic"));
        assert_eq!(result.generations, Some(10));
        let history = result.fitness_history.as_ref().map(Vec::len);
        assert_eq!(history, Some(11));
        assert!(result.best_fitness.is_some());
        assert!(result.all_placed());
    }

    #[test]
    fn test_same_seed_same_result() {
        let parts = cabinet_parts();
        let stocks = vec![StockSheet::new("S", 2440.0, 1220.0).with_quantity(4)];
        let run = |seed| {
            GeneticOptimizer::new(CutSettings::new().with_kerf(4.0), seed)
                .with_ga_config(small_config())
                .optimize(&parts, &stocks)
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_empty_inputs_skip_search() {
        let optimizer = GeneticOptimizer::with_default_seed(CutSettings::default());
        let result = optimizer.optimize(&[], &[StockSheet::new("S", 10.0, 10.0)]);
        assert_eq!(result, OptimizeResult::new().with_algorithm("Genetic"));

        let result = optimizer.optimize(&[Part::new("P", 5.0, 5.0).with_quantity(2)], &[]);
        assert_eq!(result.sheets_used(), 0);
        assert_eq!(result.unplaced_count(), 2);
        assert_eq!(result.generations, None);
    }

    #[test]
    fn test_cancelled_run_still_decodes() {
        let optimizer = GeneticOptimizer::new(CutSettings::default(), 1);
        optimizer.cancel_handle().store(true, Ordering::Relaxed);
        let result = optimizer.optimize(
            &[Part::new("P", 100.0, 100.0).with_quantity(3)],
            &[StockSheet::new("S", 500.0, 500.0)],
        );
        assert_eq!(result.generations, Some(0));
        assert_eq!(result.placed_count(), 3);
    }
}
