//! # sheetcut Core
//!
//! Data model, settings and search framework for the sheetcut cutting-stock
//! engine.
//!
//! ## Core Components
//!
//! - **Input model**: [`Part`], [`StockSheet`], [`Grain`], [`TabConfig`]
//! - **Settings**: [`CutSettings`], [`Algorithm`]
//! - **Output**: [`Placement`], [`SheetResult`], [`OptimizeResult`]
//! - **Optimizer trait**: [`Optimizer`], implemented by the packing crates
//! - **GA framework**: [`GaRunner`], [`GaProblem`], [`Chromosome`]
//!
//! ## Configuration
//!
//! ```rust
//! use sheetcut_core::{Algorithm, CutSettings};
//!
//! let settings = CutSettings::new()
//!     .with_kerf(3.2)
//!     .with_edge_trim(10.0)
//!     .with_algorithm(Algorithm::Genetic);
//! assert!(settings.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod ga;
pub mod geometry;
pub mod placement;
pub mod result;
pub mod solver;

// Re-exports
pub use error::{Error, Result};
pub use ga::{
    Chromosome, GaConfig, GaProblem, GaResult, GaRunner, Gene, Individual, MIN_POPULATION,
};
pub use geometry::{
    can_place_with_grain, EdgePadding, Grain, ItemId, Part, Rect, StockSheet, TabConfig, TabMode,
    FIT_EPSILON, MIN_USABLE_DIMENSION,
};
pub use placement::{Placement, PlacementStats};
pub use result::{OptimizeResult, OptimizeSummary, SheetResult};
pub use solver::{Algorithm, CutSettings, Optimizer, DEFAULT_SEED};
