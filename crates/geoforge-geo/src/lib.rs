//! Geodata grid model.
//!
//! Cells, blocks, wall configurations and selection primitives consumed by
//! the renderer and the editor shell. This crate owns no GPU state and is
//! kept free of heavyweight dependencies.

pub mod block;
pub mod cell;
pub mod coords;
pub mod nswe;
pub mod selection;

pub use block::{BlockType, GeoBlock};
pub use cell::{CellId, CellSize, GeoCell};
pub use coords::Vec3;
pub use nswe::Nswe;
pub use selection::{SelectionBox, SelectionState};
