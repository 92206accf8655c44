//! Stock selection: which unused sheet to open next.

use sheetcut_core::{can_place_with_grain, CutSettings, Part, StockSheet, FIT_EPSILON};

use crate::exclusion::usable_rects;
use crate::layout::try_insert;
use crate::packer::GuillotinePacker;

/// Picks the sheet in `pool` to open for the `remaining` parts.
///
/// Only sheets whose trimmed size can hold the largest remaining part are
/// considered. With several candidates, each distinct sheet size gets a
/// trial packing of the whole batch and the one covering the largest share
/// of its own area wins; ties go to the earlier candidate.
///
/// Returns an index into `pool`, or `None` when no sheet can take the
/// largest part.
pub fn select_stock(
    remaining: &[&Part],
    pool: &[&StockSheet],
    settings: &CutSettings,
) -> Option<usize> {
    let largest = largest_part(remaining)?;

    let candidates: Vec<usize> = pool
        .iter()
        .enumerate()
        .filter(|(_, stock)| fits_trimmed(largest, stock, settings))
        .map(|(idx, _)| idx)
        .collect();

    match candidates.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => {
            let mut best: Option<(usize, f64)> = None;
            let mut seen: Vec<(f64, f64)> = Vec::new();

            for &idx in &candidates {
                let stock = pool[idx];
                let size = (stock.width(), stock.height());
                if seen.contains(&size) {
                    continue;
                }
                seen.push(size);

                let score = trial_score(remaining, stock, settings);
                match best {
                    Some((_, best_score)) if score <= best_score => {}
                    _ => best = Some((idx, score)),
                }
            }

            best.map(|(idx, _)| idx)
        }
    }
}

/// The first part with the largest area.
fn largest_part<'a>(parts: &[&'a Part]) -> Option<&'a Part> {
    let mut largest: Option<&Part> = None;
    for &part in parts {
        match largest {
            Some(current) if part.area() <= current.area() => {}
            _ => largest = Some(part),
        }
    }
    largest
}

/// Whether `part` plus kerf fits inside the trimmed sheet in an orientation
/// the grain rule allows. Tab exclusions are not considered here.
pub fn fits_trimmed(part: &Part, stock: &StockSheet, settings: &CutSettings) -> bool {
    if !part.has_positive_size() {
        return false;
    }
    let trim = settings.effective_trim();
    let usable_w = stock.width() - 2.0 * trim;
    let usable_h = stock.height() - 2.0 * trim;
    let kerf = settings.effective_kerf();

    [false, true].into_iter().any(|rotated| {
        let (w, h) = part.oriented(rotated);
        can_place_with_grain(part.grain(), stock.grain(), rotated)
            && w + kerf <= usable_w + FIT_EPSILON
            && h + kerf <= usable_h + FIT_EPSILON
    })
}

/// Placed area over sheet area after packing `parts` onto a fresh `stock`.
fn trial_score(parts: &[&Part], stock: &StockSheet, settings: &CutSettings) -> f64 {
    let stock_area = stock.area();
    if stock_area <= 0.0 {
        return 0.0;
    }

    let mut packer =
        GuillotinePacker::new(usable_rects(stock, settings), settings.effective_kerf());
    let placed_area: f64 = parts
        .iter()
        .filter(|part| try_insert(&mut packer, part, stock.grain(), false).is_some())
        .map(|part| part.area())
        .sum();

    placed_area / stock_area
}
