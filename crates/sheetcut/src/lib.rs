//! # Sheetcut
//!
//! 2D cutting-stock optimization for panel saws and CNC routers.
//!
//! Lays out rectangular parts on stock sheets with guillotine cuts,
//! honoring kerf, edge trim, hold-down tabs and material grain.
//!
//! ## Quick Start
//!
//! ```rust
//! use sheetcut::{optimize, CutSettings, Part, StockSheet};
//!
//! let settings = CutSettings::new().with_kerf(3.0).with_edge_trim(10.0);
//! let parts = vec![Part::new("shelf", 764.0, 300.0).with_quantity(4)];
//! let stocks = vec![StockSheet::new("birch", 2440.0, 1220.0).with_quantity(2)];
//!
//! let result = optimize(&settings, &parts, &stocks);
//! assert!(result.all_placed());
//! assert_eq!(result.sheets_used(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support for inputs, settings and results

/// Data model, settings, results and the GA framework.
pub use sheetcut_core as core;

/// Packer and optimizers.
pub use sheetcut_guillotine as guillotine;

// Re-export commonly used types at root level
pub use sheetcut_core::{
    Algorithm, CutSettings, EdgePadding, Error, GaConfig, Grain, OptimizeResult, OptimizeSummary,
    Optimizer, Part, Placement, Rect, Result, SheetResult, StockSheet, TabConfig, TabMode,
    DEFAULT_SEED,
};
pub use sheetcut_guillotine::{
    optimize, optimize_by_material, optimize_genetic, CutOptimizer, GeneticOptimizer,
    GreedyOptimizer,
};
