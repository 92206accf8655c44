//! Placement of a part on a sheet.

use crate::geometry::{ItemId, Part, Rect};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A part positioned on a sheet. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// Copy of the placed part.
    pub part: Part,
    /// Left edge of the part (before kerf clearance).
    pub x: f64,
    /// Top edge of the part (before kerf clearance).
    pub y: f64,
    /// Whether the part was turned 90°.
    pub rotated: bool,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(part: Part, x: f64, y: f64, rotated: bool) -> Self {
        Self {
            part,
            x,
            y,
            rotated,
        }
    }

    /// Placed width, after rotation.
    pub fn width(&self) -> f64 {
        self.part.oriented(self.rotated).0
    }

    /// Placed height, after rotation.
    pub fn height(&self) -> f64 {
        self.part.oriented(self.rotated).1
    }

    /// Area of the part itself.
    pub fn area(&self) -> f64 {
        self.part.area()
    }

    /// The part's bounding rectangle on the sheet.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width(), self.height())
    }

    /// The footprint including kerf clearance on the right and bottom.
    pub fn kerf_rect(&self, kerf: f64) -> Rect {
        Rect::new(self.x, self.y, self.width() + kerf, self.height() + kerf)
    }
}

/// Statistics for a set of placements.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementStats {
    /// Total number of placements.
    pub count: usize,
    /// Number of rotated placements.
    pub rotated_count: usize,
    /// Placements per part id.
    pub per_part: HashMap<ItemId, usize>,
}

impl PlacementStats {
    /// Computes statistics from a set of placements.
    pub fn from_placements<'a, I>(placements: I) -> Self
    where
        I: IntoIterator<Item = &'a Placement>,
    {
        let mut stats = Self::default();
        for p in placements {
            stats.count += 1;
            if p.rotated {
                stats.rotated_count += 1;
            }
            *stats.per_part.entry(p.part.id().clone()).or_insert(0) += 1;
        }
        stats
    }
}
