//! Optimizer output.

use crate::geometry::{Part, StockSheet};
use crate::placement::{Placement, PlacementStats};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One consumed stock sheet and the parts laid out on it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetResult {
    /// Copy of the stock sheet (its quantity is that of the source type).
    pub stock: StockSheet,
    /// Placements in packing order.
    pub placements: Vec<Placement>,
}

impl SheetResult {
    /// Creates an empty sheet result.
    pub fn new(stock: StockSheet) -> Self {
        Self {
            stock,
            placements: Vec::new(),
        }
    }

    /// Total area of the placed parts.
    pub fn used_area(&self) -> f64 {
        self.placements.iter().map(Placement::area).sum()
    }

    /// Area of the stock sheet.
    pub fn stock_area(&self) -> f64 {
        self.stock.area()
    }

    /// Used area over stock area (0.0 - 1.0), zero for a degenerate sheet.
    pub fn efficiency(&self) -> f64 {
        let stock_area = self.stock_area();
        if stock_area > 0.0 {
            self.used_area() / stock_area
        } else {
            0.0
        }
    }

    /// Stock area not covered by parts.
    pub fn waste_area(&self) -> f64 {
        (self.stock_area() - self.used_area()).max(0.0)
    }
}

/// The engine's sole output.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizeResult {
    /// Consumed sheets in the order they were opened.
    pub sheets: Vec<SheetResult>,

    /// One entry per expanded unit that could not be placed.
    pub unplaced: Vec<Part>,

    /// Algorithm that produced this result.
    pub algorithm: Option<String>,

    /// Fitness of the decoded individual (genetic runs).
    pub best_fitness: Option<f64>,

    /// Generations evolved (genetic runs).
    pub generations: Option<u32>,

    /// Best fitness per generation (genetic runs).
    pub fitness_history: Option<Vec<f64>>,
}

impl OptimizeResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sheets consumed.
    pub fn sheets_used(&self) -> usize {
        self.sheets.len()
    }

    /// Number of placed units.
    pub fn placed_count(&self) -> usize {
        self.sheets.iter().map(|s| s.placements.len()).sum()
    }

    /// Number of unplaced units.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Returns true if every unit was placed.
    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Iterates over every placement on every sheet.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.sheets.iter().flat_map(|s| s.placements.iter())
    }

    pub fn total_used_area(&self) -> f64 {
        self.sheets.iter().map(SheetResult::used_area).sum()
    }

    pub fn total_stock_area(&self) -> f64 {
        self.sheets.iter().map(SheetResult::stock_area).sum()
    }

    /// Aggregate efficiency over all consumed sheets.
    pub fn efficiency(&self) -> f64 {
        let stock_area = self.total_stock_area();
        if stock_area > 0.0 {
            self.total_used_area() / stock_area
        } else {
            0.0
        }
    }

    pub fn waste_area(&self) -> f64 {
        self.sheets.iter().map(SheetResult::waste_area).sum()
    }

    /// Sum of the prices of consumed sheets.
    pub fn total_cost(&self) -> f64 {
        self.sheets.iter().map(|s| s.stock.price()).sum()
    }

    /// Returns efficiency as a percentage string.
    pub fn efficiency_percent(&self) -> String {
        format!("{:.1}%", self.efficiency() * 100.0)
    }

    /// Computes placement statistics.
    pub fn placement_stats(&self) -> PlacementStats {
        PlacementStats::from_placements(self.placements())
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Appends another result's sheets and unplaced parts.
    ///
    /// Run metadata of `other` is dropped; the merged result describes the
    /// combined layout only.
    pub fn merge(&mut self, other: OptimizeResult) {
        self.sheets.extend(other.sheets);
        self.unplaced.extend(other.unplaced);
    }
}

/// Summary statistics for an optimize result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizeSummary {
    /// Units requested (placed + unplaced).
    pub total_requested: usize,
    /// Units placed.
    pub total_placed: usize,
    /// Sheets consumed.
    pub sheets_used: usize,
    /// Aggregate efficiency percentage.
    pub efficiency_percent: f64,
    /// Unused stock area.
    pub waste_area: f64,
    /// Total stock price.
    pub total_cost: f64,
    /// Algorithm used.
    pub algorithm: String,
    /// Fitness of the returned layout (genetic runs).
    pub best_fitness: Option<f64>,
    /// Generations evolved (genetic runs).
    pub generations: Option<u32>,
}

impl From<&OptimizeResult> for OptimizeSummary {
    fn from(result: &OptimizeResult) -> Self {
        Self {
            total_requested: result.placed_count() + result.unplaced_count(),
            total_placed: result.placed_count(),
            sheets_used: result.sheets_used(),
            efficiency_percent: result.efficiency() * 100.0,
            waste_area: result.waste_area(),
            total_cost: result.total_cost(),
            algorithm: result
                .algorithm
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            best_fitness: result.best_fitness,
            generations: result.generations,
        }
    }
}
