//! Largest-first greedy optimizer.

use sheetcut_core::{Algorithm, CutSettings, OptimizeResult, Optimizer, Part, StockSheet};

use crate::layout::{area_descending_order, expand_parts, pack_in_order};

/// Packs units in area-descending order, never rotating unless the
/// un-rotated footprint does not fit.
#[derive(Debug, Clone, Default)]
pub struct GreedyOptimizer {
    settings: CutSettings,
}

impl GreedyOptimizer {
    pub fn new(settings: CutSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CutSettings {
        &self.settings
    }
}

impl Optimizer for GreedyOptimizer {
    fn optimize(&self, parts: &[Part], stocks: &[StockSheet]) -> OptimizeResult {
        let units = expand_parts(parts);
        let sequence: Vec<(usize, bool)> = area_descending_order(&units, parts)
            .into_iter()
            .map(|unit| (units[unit].part_index, false))
            .collect();

        let result = pack_in_order(&self.settings, parts, stocks, &sequence)
            .with_algorithm(self.name());

        if !result.all_placed() {
            log::warn!("{} of {} units could not be placed", result.unplaced_count(), units.len());
        }
        log::info!(
            "greedy: {} units on {} sheets, efficiency {}",
            result.placed_count(),
            result.sheets_used(),
            result.efficiency_percent()
        );
        result
    }

    fn name(&self) -> &'static str {
        Algorithm::Greedy.name()
    }
}
