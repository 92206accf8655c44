//! Multi-material jobs as independent optimizer runs.
//!
//! Parts are grouped by material in order of first appearance. Each group
//! is laid out on stock of the same material or stock with no material.
//! Parts without a material go last and may use any stock left over.
//! Sheets consumed by one group are unavailable to later groups.

use sheetcut_core::{CutSettings, OptimizeResult, Optimizer, Part, StockSheet};

use crate::optimizer::CutOptimizer;

/// Optimizes each material group separately and concatenates the results.
///
/// Every group runs the algorithm named in `settings`; genetic runs use
/// `seed`. Run metadata of the individual groups is not kept.
pub fn optimize_by_material(
    settings: &CutSettings,
    parts: &[Part],
    stocks: &[StockSheet],
    seed: u64,
) -> OptimizeResult {
    let optimizer = CutOptimizer::new(settings.clone()).with_seed(seed);
    let mut available: Vec<StockSheet> = stocks.to_vec();
    let mut merged = OptimizeResult::new().with_algorithm(optimizer.name());

    for material in material_order(parts) {
        let group: Vec<Part> = parts
            .iter()
            .filter(|p| p.material() == Some(material))
            .cloned()
            .collect();
        let pool: Vec<usize> = available
            .iter()
            .enumerate()
            .filter(|(_, s)| s.material().map_or(true, |m| m == material))
            .map(|(idx, _)| idx)
            .collect();

        log::debug!(
            "material '{}': {} part types, {} stock types",
            material,
            group.len(),
            pool.len()
        );
        run_group(&optimizer, &group, &mut available, &pool, &mut merged);
    }

    let unassigned: Vec<Part> = parts
        .iter()
        .filter(|p| p.material().is_none())
        .cloned()
        .collect();
    if !unassigned.is_empty() {
        let pool: Vec<usize> = (0..available.len()).collect();
        run_group(&optimizer, &unassigned, &mut available, &pool, &mut merged);
    }

    merged
}

/// Distinct part materials in order of first appearance.
fn material_order(parts: &[Part]) -> Vec<&str> {
    let mut order: Vec<&str> = Vec::new();
    for material in parts.iter().filter_map(Part::material) {
        if !order.contains(&material) {
            order.push(material);
        }
    }
    order
}

/// Runs one group against `available[pool]` and deducts the sheets it used.
fn run_group(
    optimizer: &CutOptimizer,
    group: &[Part],
    available: &mut Vec<StockSheet>,
    pool: &[usize],
    merged: &mut OptimizeResult,
) {
    let stocks: Vec<StockSheet> = pool.iter().map(|&idx| available[idx].clone()).collect();
    let result = optimizer.optimize(group, &stocks);

    for sheet in &result.sheets {
        if let Some(pos) = stocks.iter().position(|s| s == &sheet.stock) {
            let stock = &mut available[pool[pos]];
            *stock = stock.clone().with_quantity(stock.quantity().saturating_sub(1));
        }
    }
    available.retain(|s| s.quantity() > 0);

    merged.merge(result);
}
