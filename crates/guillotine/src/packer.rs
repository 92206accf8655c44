//! Guillotine free-rectangle packer for a single sheet.
//!
//! The packer keeps a list of disjoint free rectangles. Each insert picks the
//! best-area-fit rectangle, places the item in its top-left corner and splits
//! the leftover L-shape with one straight cut into at most two rectangles.
//!
//! The list is scanned linearly on every insert; realistic cut lists put tens
//! to low hundreds of parts on a sheet, where a spatial index does not pay
//! for itself.

use sheetcut_core::{Rect, FIT_EPSILON};

/// Free space of one sheet attempt.
#[derive(Debug, Clone)]
pub struct GuillotinePacker {
    free: Vec<Rect>,
    kerf: f64,
}

impl GuillotinePacker {
    /// Creates a packer over the given free rectangles.
    ///
    /// `kerf` is added to the width and height of every item before
    /// fit-testing.
    pub fn new(free: Vec<Rect>, kerf: f64) -> Self {
        Self {
            free,
            kerf: kerf.max(0.0),
        }
    }

    /// Current free rectangles.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Kerf clearance added to every item.
    pub fn kerf(&self) -> f64 {
        self.kerf
    }

    /// Returns true if a `width × height` item fits some free rectangle.
    pub fn can_fit(&self, width: f64, height: f64) -> bool {
        self.find_best(width, height).is_some()
    }

    /// Places a `width × height` item and returns its top-left corner, or
    /// `None` if no free rectangle can hold it (the free list is unchanged).
    ///
    /// Among fitting rectangles the one with the least leftover area wins;
    /// exact ties go to the earlier rectangle in the list.
    pub fn insert(&mut self, width: f64, height: f64) -> Option<(f64, f64)> {
        let idx = self.find_best(width, height)?;
        let chosen = self.free.remove(idx);

        let need_w = width + self.kerf;
        let need_h = height + self.kerf;
        let right_w = chosen.width - need_w;
        let bottom_h = chosen.height - need_h;

        let (right, bottom) = if right_w * chosen.height > chosen.width * bottom_h {
            // Vertical cut: the right remainder keeps the full height.
            (
                Rect::new(chosen.x + need_w, chosen.y, right_w, chosen.height),
                Rect::new(chosen.x, chosen.y + need_h, need_w, bottom_h),
            )
        } else {
            // Horizontal cut: the bottom remainder keeps the full width.
            (
                Rect::new(chosen.x + need_w, chosen.y, right_w, need_h),
                Rect::new(chosen.x, chosen.y + need_h, chosen.width, bottom_h),
            )
        };

        for remainder in [right, bottom] {
            if !remainder.is_thinner_than(FIT_EPSILON) {
                self.free.push(remainder);
            }
        }

        Some((chosen.x, chosen.y))
    }

    fn find_best(&self, width: f64, height: f64) -> Option<usize> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        let need_w = width + self.kerf;
        let need_h = height + self.kerf;
        let item_area = width * height;

        let mut best: Option<(usize, f64)> = None;
        for (idx, free) in self.free.iter().enumerate() {
            if need_w > free.width + FIT_EPSILON || need_h > free.height + FIT_EPSILON {
                continue;
            }
            let leftover = free.width * free.height - item_area;
            match best {
                Some((_, best_leftover)) if leftover >= best_leftover => {}
                _ => best = Some((idx, leftover)),
            }
        }

        best.map(|(idx, _)| idx)
    }
}
