//! Cut settings and the optimizer trait.

use crate::geometry::{Part, StockSheet, TabConfig};
use crate::result::OptimizeResult;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Seed used when a caller does not pick one. Keeps results reproducible
/// across runs that rely on the default.
pub const DEFAULT_SEED: u64 = 42;

/// Optimization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// Largest-first greedy packing (fast, deterministic).
    #[default]
    Greedy,
    /// Genetic search over packing order and rotation (slower, better).
    Genetic,
}

impl Algorithm {
    /// Display name recorded in results.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Greedy => "Greedy",
            Algorithm::Genetic => "Genetic",
        }
    }
}

/// Machine and layout settings shared by every sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CutSettings {
    /// Material removed by the blade, added as clearance to every part.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kerf_width: f64,

    /// Excluded border on every side of each sheet.
    #[cfg_attr(feature = "serde", serde(default))]
    pub edge_trim: f64,

    /// Algorithm to run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub algorithm: Algorithm,

    /// Tab configuration for sheets without their own.
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_tabs: TabConfig,
}

impl Default for CutSettings {
    fn default() -> Self {
        Self {
            kerf_width: 0.0,
            edge_trim: 0.0,
            algorithm: Algorithm::default(),
            default_tabs: TabConfig::disabled(),
        }
    }
}

impl CutSettings {
    /// Creates settings with zero kerf and trim.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the kerf width.
    pub fn with_kerf(mut self, kerf: f64) -> Self {
        self.kerf_width = kerf;
        self
    }

    /// Sets the edge trim.
    pub fn with_edge_trim(mut self, trim: f64) -> Self {
        self.edge_trim = trim;
        self
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the default tab configuration.
    pub fn with_default_tabs(mut self, tabs: TabConfig) -> Self {
        self.default_tabs = tabs;
        self
    }

    /// Kerf used for layout. Negative or NaN widths count as zero.
    pub fn effective_kerf(&self) -> f64 {
        self.kerf_width.max(0.0)
    }

    /// Edge trim used for layout. Negative or NaN trims count as zero, so the
    /// usable area never extends past the sheet.
    pub fn effective_trim(&self) -> f64 {
        self.edge_trim.max(0.0)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.kerf_width >= 0.0) {
            return Err(Error::InvalidSettings(format!(
                "kerf width must be non-negative, got {}",
                self.kerf_width
            )));
        }
        if !(self.edge_trim >= 0.0) {
            return Err(Error::InvalidSettings(format!(
                "edge trim must be non-negative, got {}",
                self.edge_trim
            )));
        }
        Ok(())
    }
}

/// A cutting-stock optimizer.
///
/// Implementations are pure: the result depends only on `self` (settings and
/// seed) and the inputs. They never fail; parts that cannot be placed come
/// back in [`OptimizeResult::unplaced`].
pub trait Optimizer {
    /// Lays out `parts` on sheets drawn from `stocks`.
    fn optimize(&self, parts: &[Part], stocks: &[StockSheet]) -> OptimizeResult;

    /// Algorithm name recorded in results.
    fn name(&self) -> &'static str;
}
