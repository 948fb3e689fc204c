//! Color model for the cell renderer.
//!
//! Scope:
//! - straight-alpha RGBA color representation
//! - the precomputed per-selection-state color table (the color policy)

pub mod color;
pub mod table;

pub use color::Color;
pub use table::{CELL_ALPHA, ColorTable, StateColors};
