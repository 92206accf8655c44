//! Input model: parts, stock sheets, grain and tab configuration.
//!
//! Coordinates use a top-left origin with `y` growing downwards, matching the
//! layout consumers (canvas, labels, toolpaths) that read the placements.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance for fit comparisons against free space.
pub const FIT_EPSILON: f64 = 0.001;

/// Free rectangles narrower or shorter than this (in sheet units) are
/// discarded after exclusion zones are subtracted.
pub const MIN_USABLE_DIMENSION: f64 = 1.0;

/// Unique identifier for parts and stock sheets.
pub type ItemId = String;

/// Directional material property restricting 90° rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Grain {
    /// No grain: any orientation is allowed.
    #[default]
    None,
    /// Grain runs along the width (x axis).
    Horizontal,
    /// Grain runs along the height (y axis).
    Vertical,
}

impl Grain {
    /// Returns true if this grain does not restrict rotation.
    pub fn is_unconstrained(self) -> bool {
        self == Grain::None
    }
}

/// Returns whether a part with `part_grain` may be placed on a sheet with
/// `stock_grain` in the given orientation.
///
/// - An ungrained part may take either orientation.
/// - A grained part on an ungrained sheet keeps its drawn orientation.
/// - On a grained sheet, a grained part goes un-rotated when the grains match
///   and rotated when they differ, so the grains always line up.
pub fn can_place_with_grain(part_grain: Grain, stock_grain: Grain, rotated: bool) -> bool {
    match (part_grain, stock_grain) {
        (Grain::None, _) => true,
        (_, Grain::None) => !rotated,
        (part, stock) => (part == stock) != rotated,
    }
}

/// Axis-aligned rectangle `(x, y, width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area, zero for degenerate rectangles.
    pub fn area(&self) -> f64 {
        if self.width <= 0.0 || self.height <= 0.0 {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// Returns true if either side is at most `min`.
    pub fn is_thinner_than(&self, min: f64) -> bool {
        self.width <= min || self.height <= min
    }

    /// Returns true if the interiors overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Returns the overlapping region, if the interiors overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Rect::new(x, y, right - x, bottom - y))
    }

    /// Returns true if `other` lies inside `self`, within `epsilon`.
    pub fn contains_rect(&self, other: &Rect, epsilon: f64) -> bool {
        other.x >= self.x - epsilon
            && other.y >= self.y - epsilon
            && other.right() <= self.right() + epsilon
            && other.bottom() <= self.bottom() + epsilon
    }
}

/// How tab exclusion zones are derived for a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TabMode {
    /// Padding bands along the sheet edges.
    #[default]
    Simple,
    /// Explicit exclusion rectangles.
    Advanced,
}

/// Padding bands for [`TabMode::Simple`], measured from the sheet edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EdgePadding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl EdgePadding {
    /// Same padding on every edge.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }
}

/// Hold-down tab configuration: areas of a sheet the cutter must avoid.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TabConfig {
    /// Whether any exclusions apply.
    pub enabled: bool,
    /// Simple edge bands or explicit zones.
    pub mode: TabMode,
    /// Edge bands used in simple mode.
    pub padding: EdgePadding,
    /// Zones in sheet coordinates used in advanced mode.
    pub zones: Vec<Rect>,
}

impl TabConfig {
    /// A configuration with no exclusions.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Simple mode with the given edge bands.
    pub fn simple(padding: EdgePadding) -> Self {
        Self {
            enabled: true,
            mode: TabMode::Simple,
            padding,
            zones: Vec::new(),
        }
    }

    /// Advanced mode with explicit zones.
    pub fn advanced(zones: Vec<Rect>) -> Self {
        Self {
            enabled: true,
            mode: TabMode::Advanced,
            padding: EdgePadding::default(),
            zones,
        }
    }
}

#[cfg(feature = "serde")]
fn default_quantity() -> usize {
    1
}

/// A required part.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Part {
    id: ItemId,
    #[cfg_attr(feature = "serde", serde(default))]
    label: String,
    width: f64,
    height: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    quantity: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    grain: Grain,
    #[cfg_attr(feature = "serde", serde(default))]
    material: Option<String>,
    /// Outline carried through for downstream consumers; the packer only
    /// ever uses the bounding rectangle.
    #[cfg_attr(feature = "serde", serde(default))]
    outline: Option<Vec<[f64; 2]>>,
}

impl Part {
    /// Creates a part with quantity 1 and no grain.
    pub fn new(id: impl Into<ItemId>, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            width,
            height,
            quantity: 1,
            grain: Grain::None,
            material: None,
            outline: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_quantity(mut self, n: usize) -> Self {
        self.quantity = n;
        self
    }

    pub fn with_grain(mut self, grain: Grain) -> Self {
        self.grain = grain;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_outline(mut self, outline: Vec<[f64; 2]>) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn quantity(&self) -> usize {
        self.quantity
    }

    pub fn grain(&self) -> Grain {
        self.grain
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    pub fn outline(&self) -> Option<&[[f64; 2]]> {
        self.outline.as_deref()
    }

    /// Area of the bounding rectangle, zero for non-positive dimensions.
    pub fn area(&self) -> f64 {
        if self.has_positive_size() {
            self.width * self.height
        } else {
            0.0
        }
    }

    /// Returns true if both dimensions are positive.
    pub fn has_positive_size(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Footprint `(width, height)` in the given orientation.
    pub fn oriented(&self, rotated: bool) -> (f64, f64) {
        if rotated {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.has_positive_size() {
            return Err(Error::InvalidPart(format!(
                "Dimensions for '{}' must be positive",
                self.id
            )));
        }
        if self.quantity == 0 {
            return Err(Error::InvalidPart(format!(
                "Quantity for '{}' must be at least 1",
                self.id
            )));
        }
        Ok(())
    }
}

/// An available stock sheet type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StockSheet {
    id: ItemId,
    #[cfg_attr(feature = "serde", serde(default))]
    label: String,
    width: f64,
    height: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    quantity: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    grain: Grain,
    #[cfg_attr(feature = "serde", serde(default))]
    material: Option<String>,
    /// Per-sheet override of the default tab configuration.
    #[cfg_attr(feature = "serde", serde(default))]
    tabs: Option<TabConfig>,
    #[cfg_attr(feature = "serde", serde(default))]
    price: f64,
}

impl StockSheet {
    /// Creates a stock sheet with quantity 1, no grain and no price.
    pub fn new(id: impl Into<ItemId>, width: f64, height: f64) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            width,
            height,
            quantity: 1,
            grain: Grain::None,
            material: None,
            tabs: None,
            price: 0.0,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_quantity(mut self, n: usize) -> Self {
        self.quantity = n;
        self
    }

    pub fn with_grain(mut self, grain: Grain) -> Self {
        self.grain = grain;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_tabs(mut self, tabs: TabConfig) -> Self {
        self.tabs = Some(tabs);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn quantity(&self) -> usize {
        self.quantity
    }

    pub fn grain(&self) -> Grain {
        self.grain
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    pub fn tabs(&self) -> Option<&TabConfig> {
        self.tabs.as_ref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Sheet area, zero for non-positive dimensions.
    pub fn area(&self) -> f64 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width * self.height
        } else {
            0.0
        }
    }

    /// The tab configuration in effect: this sheet's override or `default`.
    pub fn effective_tabs<'a>(&'a self, default: &'a TabConfig) -> &'a TabConfig {
        self.tabs.as_ref().unwrap_or(default)
    }

    /// Sheet bounds shrunk by `edge_trim` on all sides.
    pub fn trimmed_bounds(&self, edge_trim: f64) -> Rect {
        Rect::new(
            edge_trim,
            edge_trim,
            self.width - 2.0 * edge_trim,
            self.height - 2.0 * edge_trim,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::InvalidStock(format!(
                "Dimensions for '{}' must be positive",
                self.id
            )));
        }
        if self.price < 0.0 {
            return Err(Error::InvalidStock(format!(
                "Price for '{}' cannot be negative",
                self.id
            )));
        }
        Ok(())
    }
}
