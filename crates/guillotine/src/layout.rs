//! Shared layout utilities for the greedy and genetic optimizers.
//!
//! Both optimizers reduce to the same procedure: expand quantities into
//! units, fix an order (and a preferred orientation per unit), then fill
//! sheets one at a time. Only the order differs: the greedy optimizer uses
//! area-descending order, the genetic optimizer lets a chromosome decide.

use sheetcut_core::{
    can_place_with_grain, CutSettings, Grain, OptimizeResult, Part, Placement, SheetResult,
    StockSheet,
};

use crate::exclusion::usable_rects;
use crate::packer::GuillotinePacker;
use crate::selector::select_stock;

/// One expanded unit of a requested part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartUnit {
    /// Index into the parts slice.
    pub part_index: usize,
    /// Instance number within that part's quantity.
    pub instance_num: usize,
}

/// Expands every part by its quantity, in input order.
pub fn expand_parts(parts: &[Part]) -> Vec<PartUnit> {
    let mut units = Vec::new();
    for (part_index, part) in parts.iter().enumerate() {
        if !part.has_positive_size() {
            log::warn!(
                "part '{}' has non-positive dimensions {}x{} and cannot be placed",
                part.id(),
                part.width(),
                part.height()
            );
        }
        for instance_num in 0..part.quantity() {
            units.push(PartUnit {
                part_index,
                instance_num,
            });
        }
    }
    units
}

/// Expands every stock type by its quantity into a pool of stock indices.
pub fn expand_stock(stocks: &[StockSheet]) -> Vec<usize> {
    stocks
        .iter()
        .enumerate()
        .flat_map(|(idx, stock)| std::iter::repeat(idx).take(stock.quantity()))
        .collect()
}

/// Unit indices sorted by part area, largest first. Equal areas keep their
/// expansion order.
pub fn area_descending_order(units: &[PartUnit], parts: &[Part]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..units.len()).collect();
    order.sort_by(|&a, &b| {
        let area_a = parts[units[a].part_index].area();
        let area_b = parts[units[b].part_index].area();
        area_b
            .partial_cmp(&area_a)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Inserts `part` into `packer`, trying the preferred orientation first and
/// then the other one. Orientations the grain rule forbids are skipped.
///
/// Returns the top-left corner and whether the part ended up rotated.
pub fn try_insert(
    packer: &mut GuillotinePacker,
    part: &Part,
    stock_grain: Grain,
    prefer_rotated: bool,
) -> Option<(f64, f64, bool)> {
    for rotated in [prefer_rotated, !prefer_rotated] {
        if !can_place_with_grain(part.grain(), stock_grain, rotated) {
            continue;
        }
        let (width, height) = part.oriented(rotated);
        if let Some((x, y)) = packer.insert(width, height) {
            return Some((x, y, rotated));
        }
    }
    None
}

/// Like [`try_insert`], producing a [`Placement`].
pub fn try_place(
    packer: &mut GuillotinePacker,
    part: &Part,
    stock_grain: Grain,
    prefer_rotated: bool,
) -> Option<Placement> {
    try_insert(packer, part, stock_grain, prefer_rotated)
        .map(|(x, y, rotated)| Placement::new(part.clone(), x, y, rotated))
}

/// Lays out `sequence` (part index, preferred rotation) sheet by sheet.
///
/// Each round asks the stock selector for the next sheet, removes it from
/// the pool and offers it every remaining unit in order. Units that do not
/// fit carry over to the next round. The loop ends when every unit is
/// placed, the pool is empty or no remaining sheet can hold the largest
/// remaining part; whatever is left is reported unplaced.
///
/// A sheet that receives no part is still consumed but is not reported.
pub fn pack_in_order(
    settings: &CutSettings,
    parts: &[Part],
    stocks: &[StockSheet],
    sequence: &[(usize, bool)],
) -> OptimizeResult {
    let mut pool = expand_stock(stocks);
    let mut remaining = sequence.to_vec();
    let mut result = OptimizeResult::new();

    while !remaining.is_empty() && !pool.is_empty() {
        let batch: Vec<&Part> = remaining.iter().map(|&(p, _)| &parts[p]).collect();
        let candidates: Vec<&StockSheet> = pool.iter().map(|&s| &stocks[s]).collect();

        let choice = match select_stock(&batch, &candidates, settings) {
            Some(choice) => choice,
            None => break,
        };
        let stock = &stocks[pool.remove(choice)];

        let mut packer =
            GuillotinePacker::new(usable_rects(stock, settings), settings.effective_kerf());
        let mut sheet = SheetResult::new(stock.clone());
        let mut failed = Vec::new();

        for &(part_index, prefer_rotated) in &remaining {
            let part = &parts[part_index];
            match try_place(&mut packer, part, stock.grain(), prefer_rotated) {
                Some(placement) => sheet.placements.push(placement),
                None => failed.push((part_index, prefer_rotated)),
            }
        }

        log::debug!(
            "sheet {} '{}': placed {} of {} units",
            result.sheets.len() + 1,
            stock.id(),
            sheet.placements.len(),
            remaining.len()
        );

        if !sheet.placements.is_empty() {
            result.sheets.push(sheet);
        }
        remaining = failed;
    }

    result.unplaced = remaining
        .iter()
        .map(|&(part_index, _)| parts[part_index].clone())
        .collect();
    result
}
