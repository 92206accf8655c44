//! Initial free space of a sheet: edge trim and tab exclusion zones.

use sheetcut_core::{CutSettings, Rect, StockSheet, TabConfig, TabMode, MIN_USABLE_DIMENSION};

/// Free rectangles available on `stock` before any part is placed.
///
/// The sheet is shrunk by the edge trim, then every active tab exclusion is
/// cut out of it. The tab configuration is the sheet's own override or the
/// settings default. A trim that consumes the whole sheet leaves nothing.
pub fn usable_rects(stock: &StockSheet, settings: &CutSettings) -> Vec<Rect> {
    let base = stock.trimmed_bounds(settings.effective_trim());
    if base.width <= 0.0 || base.height <= 0.0 {
        return Vec::new();
    }

    let tabs = stock.effective_tabs(&settings.default_tabs);
    if !tabs.enabled {
        return vec![base];
    }

    let mut free = vec![base];
    for zone in exclusion_zones(stock, tabs) {
        free = free
            .iter()
            .flat_map(|rect| subtract_rect(rect, &zone))
            .collect();
    }

    free.retain(|r| !r.is_thinner_than(MIN_USABLE_DIMENSION));
    free
}

/// Exclusion rectangles of a tab configuration, in sheet coordinates.
///
/// Advanced mode returns the explicit zones. Simple mode returns one band per
/// non-zero edge padding: top and bottom bands span the full width, left and
/// right bands the full height.
pub fn exclusion_zones(stock: &StockSheet, tabs: &TabConfig) -> Vec<Rect> {
    if !tabs.enabled {
        return Vec::new();
    }

    match tabs.mode {
        TabMode::Advanced => tabs.zones.clone(),
        TabMode::Simple => {
            let (w, h) = (stock.width(), stock.height());
            let pad = &tabs.padding;
            let bands = [
                (pad.top, Rect::new(0.0, 0.0, w, pad.top)),
                (pad.bottom, Rect::new(0.0, h - pad.bottom, w, pad.bottom)),
                (pad.left, Rect::new(0.0, 0.0, pad.left, h)),
                (pad.right, Rect::new(w - pad.right, 0.0, pad.right, h)),
            ];
            bands
                .into_iter()
                .filter(|(size, _)| *size > 0.0)
                .map(|(_, rect)| rect)
                .collect()
        }
    }
}

/// `free` minus `cut`, as up to four disjoint pieces.
///
/// The pieces are the full-height strips left and right of the overlap and
/// the strips above and below it, limited to the overlap's width. Pieces with
/// a non-positive side are dropped; a `cut` that misses `free` leaves it
/// whole.
pub fn subtract_rect(free: &Rect, cut: &Rect) -> Vec<Rect> {
    let overlap = match free.intersection(cut) {
        Some(overlap) => overlap,
        None => return vec![*free],
    };

    let pieces = [
        Rect::new(free.x, free.y, overlap.x - free.x, free.height),
        Rect::new(
            overlap.right(),
            free.y,
            free.right() - overlap.right(),
            free.height,
        ),
        Rect::new(overlap.x, free.y, overlap.width, overlap.y - free.y),
        Rect::new(
            overlap.x,
            overlap.bottom(),
            overlap.width,
            free.bottom() - overlap.bottom(),
        ),
    ];

    pieces
        .into_iter()
        .filter(|p| p.width > 0.0 && p.height > 0.0)
        .collect()
}
