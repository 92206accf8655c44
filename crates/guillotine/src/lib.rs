//! # Sheetcut Guillotine
//!
//! Rectangular cutting-stock layout on guillotine-cut sheets.
//!
//! This crate provides the free-rectangle packer, tab and trim exclusion,
//! stock selection, and the greedy and genetic optimizers built on them.

pub mod exclusion;
pub mod genetic;
pub mod greedy;
pub mod layout;
pub mod materials;
pub mod optimizer;
pub mod packer;
pub mod selector;

// Re-exports
pub use exclusion::{exclusion_zones, subtract_rect, usable_rects};
pub use genetic::{layout_fitness, CuttingProblem, GeneticOptimizer};
pub use greedy::GreedyOptimizer;
pub use materials::optimize_by_material;
pub use optimizer::{optimize, optimize_genetic, CutOptimizer};
pub use packer::GuillotinePacker;
pub use selector::select_stock;
pub use sheetcut_core::{
    CutSettings, Error, OptimizeResult, Optimizer, Part, Result, StockSheet, DEFAULT_SEED,
};
