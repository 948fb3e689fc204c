//! Cell-geometry rendering pipeline.
//!
//! A fixed lookup table of wall-configuration geometry is built once,
//! uploaded as three immutable device buffers (indices, positions, UVs), and
//! drawn with one indexed call per visible cell selecting the block matching
//! the cell's size and NSWE configuration.

mod atlas;
mod draw;
mod geometry;
mod renderer;

pub use atlas::{AtlasImage, NsweAtlas};
pub use draw::CellDraw;
pub use geometry::{
    ATLAS_ROWS_COLS, ATLAS_TILE, BLOCK_COUNT, BLOCK_INDEX_COUNT, BLOCK_VERTEX_COUNT, CellGeometry,
};
pub use renderer::{CellRenderer, FrameView};
