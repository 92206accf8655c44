//! Genetic Algorithm framework for optimization.
//!
//! The runner is generic over a [`GaProblem`], which owns initialization,
//! evaluation, crossover and mutation. Problem-specific context (such as
//! which genes may rotate) lives on the problem, so the operators on
//! [`Chromosome`] take it as an argument rather than guessing.
//!
//! # Determinism
//!
//! The runner draws from a caller-supplied RNG in a fixed order:
//! population initialization, then per generation and per child two
//! tournaments, crossover cut points and mutation checks. Given the same
//! seeded RNG and problem, a run is reproducible bit for bit.

use rand::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest population the runner evolves: two parents for crossover.
pub const MIN_POPULATION: usize = 2;

/// Configuration for the genetic algorithm.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Population size.
    pub population_size: usize,
    /// Number of generations to evolve.
    pub generations: u32,
    /// Probability of each mutation check (0.0 - 1.0).
    pub mutation_rate: f64,
    /// Individuals drawn per tournament.
    pub tournament_size: usize,
    /// Individuals copied unchanged into the next generation.
    pub elite_count: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.15,
            tournament_size: 3,
            elite_count: 2,
        }
    }
}

impl GaConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration scaled for `units` genes.
    ///
    /// More than 20 units runs 150 generations; more than 50 runs 200
    /// generations over a population of 80.
    pub fn scaled_for(units: usize) -> Self {
        let mut config = Self::default();
        if units > 50 {
            config.generations = 200;
            config.population_size = 80;
        } else if units > 20 {
            config.generations = 150;
        }
        config
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size.max(MIN_POPULATION);
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: u32) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size.max(1);
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size < MIN_POPULATION {
            return Err(Error::ConfigError(format!(
                "population size must be at least {}, got {}",
                MIN_POPULATION, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(Error::ConfigError("tournament size must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::ConfigError(format!(
                "mutation rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.elite_count > self.population_size {
            return Err(Error::ConfigError(format!(
                "elite count {} exceeds population size {}",
                self.elite_count, self.population_size
            )));
        }
        Ok(())
    }
}

/// A member of the population.
pub trait Individual: Clone {
    /// The fitness type (usually f64). Higher is better.
    type Fitness: PartialOrd + Copy + Into<f64>;

    /// Returns the fitness of this individual.
    fn fitness(&self) -> Self::Fitness;
}

/// Problem-specific GA operations.
pub trait GaProblem {
    /// The individual type for this problem.
    type Individual: Individual;

    /// Creates the initial population of exactly `size` individuals.
    fn initialize_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Self::Individual>;

    /// Evaluates and stores the fitness of an individual.
    fn evaluate(&self, individual: &mut Self::Individual);

    /// Produces one child from two parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        rng: &mut R,
    ) -> Self::Individual;

    /// Mutates an individual in place.
    fn mutate<R: Rng>(&self, individual: &mut Self::Individual, rng: &mut R);

    /// Called after each generation (for progress reporting).
    fn on_generation(
        &self,
        _generation: u32,
        _best: &Self::Individual,
        _population: &[Self::Individual],
    ) {
    }
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual of the final population.
    pub best: I,
    /// Generations evolved.
    pub generations: u32,
    /// Best fitness at the start of each generation, plus the final best.
    pub history: Vec<f64>,
    /// Whether the run stopped early through the cancel handle.
    pub cancelled: bool,
}

/// Elitist generational GA with tournament selection.
pub struct GaRunner<P: GaProblem> {
    config: GaConfig,
    problem: P,
    cancelled: Arc<AtomicBool>,
}

impl<P: GaProblem> GaRunner<P> {
    /// Creates a new GA runner.
    pub fn new(config: GaConfig, problem: P) -> Self {
        Self {
            config,
            problem,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shares an existing cancel flag instead of the runner's own.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    /// Returns the problem definition.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Returns a handle that stops the run at the next generation boundary.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// Runs the genetic algorithm, drawing all randomness from `rng`.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> GaResult<P::Individual> {
        let population_size = self.config.population_size.max(MIN_POPULATION);
        let elite_count = self.config.elite_count.min(population_size);
        let mut history = Vec::with_capacity(self.config.generations as usize + 1);

        let mut population = self.problem.initialize_population(population_size, rng);
        for individual in population.iter_mut() {
            self.problem.evaluate(individual);
        }

        let mut generation = 0u32;
        let mut cancelled = false;

        while generation < self.config.generations {
            if self.cancelled.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }

            sort_by_fitness(&mut population);
            history.push(population[0].fitness().into());

            let mut next = Vec::with_capacity(population_size);
            next.extend(population.iter().take(elite_count).cloned());

            while next.len() < population_size {
                let parent1 = self.tournament_select(&population, rng);
                let parent2 = self.tournament_select(&population, rng);

                let mut child = self.problem.crossover(parent1, parent2, rng);
                self.problem.mutate(&mut child, rng);
                self.problem.evaluate(&mut child);

                next.push(child);
            }

            population = next;
            generation += 1;

            if let Some(best) = best_of(&population) {
                self.problem.on_generation(generation, best, &population);
            }
        }

        sort_by_fitness(&mut population);
        let best = population.swap_remove(0);
        history.push(best.fitness().into());

        GaResult {
            best,
            generations: generation,
            history,
            cancelled,
        }
    }

    /// Tournament selection with replacement; the first of equally fit
    /// contestants wins.
    fn tournament_select<'a, R: Rng>(
        &self,
        population: &'a [P::Individual],
        rng: &mut R,
    ) -> &'a P::Individual {
        let mut best_idx = rng.gen_range(0..population.len());

        for _ in 1..self.config.tournament_size {
            let idx = rng.gen_range(0..population.len());
            if population[idx].fitness() > population[best_idx].fitness() {
                best_idx = idx;
            }
        }

        &population[best_idx]
    }
}

/// Stable sort, best first.
fn sort_by_fitness<I: Individual>(population: &mut [I]) {
    population.sort_by(|a, b| {
        b.fitness()
            .partial_cmp(&a.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn best_of<I: Individual>(population: &[I]) -> Option<&I> {
    population.iter().fold(None, |best: Option<&I>, ind| match best {
        Some(b) if b.fitness() >= ind.fitness() => Some(b),
        _ => Some(ind),
    })
}

/// One placement decision: which part unit, and whether it is turned 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gene {
    /// Index of the expanded part unit.
    pub part_index: usize,
    /// Requested orientation; re-validated against grain when decoded.
    pub rotated: bool,
}

impl Gene {
    pub fn new(part_index: usize, rotated: bool) -> Self {
        Self {
            part_index,
            rotated,
        }
    }
}

/// Ordered genes plus cached fitness.
///
/// Genes are an owned `Vec`, so every clone is a deep copy and operators on
/// a child never touch its parents.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<Gene>,
    fitness: f64,
}

impl Chromosome {
    /// Creates an unevaluated chromosome from the given genes.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Genes `0..n` in order, none rotated.
    pub fn identity(n: usize) -> Self {
        Self::new((0..n).map(|i| Gene::new(i, false)).collect())
    }

    /// A random permutation of `0..n` followed by a fair coin flip for the
    /// rotation of each gene whose part may rotate.
    ///
    /// `can_rotate` is indexed by part index.
    pub fn random<R: Rng>(can_rotate: &[bool], rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..can_rotate.len()).collect();
        order.shuffle(rng);

        let genes = order
            .into_iter()
            .map(|part_index| {
                let rotated = can_rotate[part_index] && rng.gen_bool(0.5);
                Gene::new(part_index, rotated)
            })
            .collect();

        Self::new(genes)
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Returns true if the part indices form a permutation of `0..len`.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.genes.len()];
        self.genes.iter().all(|g| {
            g.part_index < seen.len() && !std::mem::replace(&mut seen[g.part_index], true)
        })
    }

    /// Order crossover (OX1).
    ///
    /// Copies `self[p1..=p2]` into the child, then fills the remaining
    /// positions from `other`, scanning and writing from `p2 + 1` with
    /// wrap-around and skipping genes already in the segment. Chromosomes of
    /// two genes or fewer are copied unchanged.
    pub fn order_crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> Self {
        let n = self.genes.len();
        if n <= 2 || other.genes.len() != n {
            let mut child = self.clone();
            child.fitness = f64::NEG_INFINITY;
            return child;
        }

        let (mut p1, mut p2) = (rng.gen_range(0..n), rng.gen_range(0..n));
        if p1 > p2 {
            std::mem::swap(&mut p1, &mut p2);
        }

        let mut child: Vec<Option<Gene>> = vec![None; n];
        let mut used = vec![false; n];

        for i in p1..=p2 {
            child[i] = Some(self.genes[i]);
            used[self.genes[i].part_index] = true;
        }

        let mut j = (p2 + 1) % n;
        for i in 0..n {
            let idx = (p2 + 1 + i) % n;
            if child[idx].is_none() {
                while used[other.genes[j].part_index] {
                    j = (j + 1) % n;
                }
                child[idx] = Some(other.genes[j]);
                used[other.genes[j].part_index] = true;
                j = (j + 1) % n;
            }
        }

        Self::new(child.into_iter().flatten().collect())
    }

    /// Swaps the genes at two random positions.
    pub fn swap_mutate<R: Rng>(&mut self, rng: &mut R) {
        let n = self.genes.len();
        if n == 0 {
            return;
        }

        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        self.genes.swap(i, j);
        self.fitness = f64::NEG_INFINITY;
    }

    /// Flips the rotation of one random gene if its part may rotate.
    pub fn rotation_mutate<R: Rng>(&mut self, can_rotate: &[bool], rng: &mut R) {
        let n = self.genes.len();
        if n == 0 {
            return;
        }

        let idx = rng.gen_range(0..n);
        let gene = &mut self.genes[idx];
        if can_rotate.get(gene.part_index).copied().unwrap_or(false) {
            gene.rotated = !gene.rotated;
            self.fitness = f64::NEG_INFINITY;
        }
    }

    /// Reverses the genes between two random positions, inclusive.
    pub fn inversion_mutate<R: Rng>(&mut self, rng: &mut R) {
        let n = self.genes.len();
        if n == 0 {
            return;
        }

        let (mut p1, mut p2) = (rng.gen_range(0..n), rng.gen_range(0..n));
        if p1 > p2 {
            std::mem::swap(&mut p1, &mut p2);
        }

        self.genes[p1..=p2].reverse();
        self.fitness = f64::NEG_INFINITY;
    }

    /// Runs the three independent mutation checks: swap and rotation each
    /// with probability `rate`, inversion with `rate / 2`.
    pub fn mutate<R: Rng>(&mut self, rate: f64, can_rotate: &[bool], rng: &mut R) {
        if rng.gen::<f64>() < rate {
            self.swap_mutate(rng);
        }
        if rng.gen::<f64>() < rate {
            self.rotation_mutate(can_rotate, rng);
        }
        if rng.gen::<f64>() < rate * 0.5 {
            self.inversion_mutate(rng);
        }
    }
}

impl Individual for Chromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }
}
