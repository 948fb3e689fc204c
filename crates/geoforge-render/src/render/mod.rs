//! GPU rendering subsystem.
//!
//! The cell renderer consumes an ordered [`RenderSelection`] and issues GPU
//! commands via wgpu. The renderer owns its own GPU resources (pipeline,
//! geometry buffers, atlas).
//!
//! Convention:
//! - cell geometry is authored in grid units around the origin and translated
//!   to the cell's world render position per instance
//! - the caller controls draw order (e.g. back-to-front for transparency)

mod ctx;
mod selector;

pub mod cells;

pub use ctx::{RenderCtx, RenderTarget};
pub use selector::RenderSelection;
