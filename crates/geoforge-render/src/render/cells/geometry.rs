use geoforge_geo::Nswe;

/// Indices per geometry block: 8 triangles, the final two forming the top cap.
pub const BLOCK_INDEX_COUNT: usize = 24;

/// Vertices per geometry block.
pub const BLOCK_VERTEX_COUNT: usize = 12;

/// Highest local vertex index inside one block.
pub const BLOCK_MAX_LOCAL_INDEX: u16 = (BLOCK_VERTEX_COUNT - 1) as u16;

/// Blocks in the combined buffer: the reserved big block plus one block per
/// wall configuration.
pub const BLOCK_COUNT: usize = Nswe::COMBINATIONS + 1;

/// NSWE atlas grid dimension (4×4 tiles, one per configuration).
pub const ATLAS_ROWS_COLS: usize = 4;

/// UV extent of one atlas tile.
pub const ATLAS_TILE: f32 = 1.0 / ATLAS_ROWS_COLS as f32;

const BLOCK_POSITION_FLOATS: usize = BLOCK_VERTEX_COUNT * 3;
const BLOCK_UV_FLOATS: usize = BLOCK_VERTEX_COUNT * 2;

// Template block: south, east and west wall quads plus the top cap over
// vertices 8–11. Vertices 0–7 form the slab box, 8–11 duplicate the top face
// so the cap can carry its own UVs.
const TEMPLATE_INDICES: [u16; BLOCK_INDEX_COUNT] = [
    0, 1, 2, 2, 3, 0, // south wall
    1, 5, 6, 6, 2, 1, // east wall
    4, 0, 3, 3, 7, 4, // west wall
    8, 9, 10, 10, 11, 8, // top cap
];

// Small footprint: one sub-cell, inset to 0.1–0.9 so neighbors stay visually
// separate; the slab spans y ∈ [-0.2, 0].
#[rustfmt::skip]
const TEMPLATE_POSITIONS_SMALL: [f32; BLOCK_POSITION_FLOATS] = [
    0.1, -0.2, 0.9,
    0.9, -0.2, 0.9,
    0.9,  0.0, 0.9,
    0.1,  0.0, 0.9,
    0.1, -0.2, 0.1,
    0.9, -0.2, 0.1,
    0.9,  0.0, 0.1,
    0.1,  0.0, 0.1,
    0.1,  0.0, 0.9, // top
    0.9,  0.0, 0.9, // top
    0.9,  0.0, 0.1, // top
    0.1,  0.0, 0.1, // top
];

// Big footprint: the whole 8×8 sub-cell block rendered as one cell.
#[rustfmt::skip]
const TEMPLATE_POSITIONS_BIG: [f32; BLOCK_POSITION_FLOATS] = [
    0.1, -0.2, 7.9,
    7.9, -0.2, 7.9,
    7.9,  0.0, 7.9,
    0.1,  0.0, 7.9,
    0.1, -0.2, 0.1,
    7.9, -0.2, 0.1,
    7.9,  0.0, 0.1,
    0.1,  0.0, 0.1,
    0.1,  0.0, 7.9, // top
    7.9,  0.0, 7.9, // top
    7.9,  0.0, 0.1, // top
    0.1,  0.0, 0.1, // top
];

/// CPU-side combined geometry for all wall configurations.
///
/// Layout: the reserved big block first, then one block per configuration
/// index, each with globally unique vertices (indices are offset by
/// 12 × block, never shared, so draw calls need no per-configuration vertex
/// rebinding).
///
/// Built once, then uploaded verbatim as immutable device buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGeometry {
    pub indices: Vec<u16>,
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
}

impl CellGeometry {
    /// Builds the full lookup table. Deterministic: identical output on every
    /// call.
    pub fn build() -> Self {
        let mut indices = Vec::with_capacity(BLOCK_COUNT * BLOCK_INDEX_COUNT);
        let mut positions = Vec::with_capacity(BLOCK_COUNT * BLOCK_POSITION_FLOATS);
        let mut uvs = Vec::with_capacity(BLOCK_COUNT * BLOCK_UV_FLOATS);

        // Reserved big block: raw template indices, large footprint, the
        // "all walls open" tile.
        indices.extend_from_slice(&TEMPLATE_INDICES);
        positions.extend_from_slice(&TEMPLATE_POSITIONS_BIG);
        push_block_uvs(&mut uvs, Nswe::ALL.index());

        for i in 0..Nswe::COMBINATIONS {
            let base = (BLOCK_VERTEX_COUNT * (i + 1)) as u16;
            indices.extend(TEMPLATE_INDICES.iter().map(|&ix| ix + base));
            positions.extend_from_slice(&TEMPLATE_POSITIONS_SMALL);
            push_block_uvs(&mut uvs, i);
        }

        Self {
            indices,
            positions,
            uvs,
        }
    }

    /// Size of the index buffer in bytes.
    pub fn index_bytes(&self) -> usize {
        self.indices.len() * std::mem::size_of::<u16>()
    }
}

/// Appends one block's UV data: wall vertices sample the atlas origin, the
/// four top-cap vertices carry the configuration tile's corners so the NSWE
/// icon shows on the cell's top face.
fn push_block_uvs(uvs: &mut Vec<f32>, tile: usize) {
    uvs.extend_from_slice(&[0.0; BLOCK_UV_FLOATS - 8]);

    let (u1, v1) = tile_origin(tile);
    let (u2, v2) = (u1 + ATLAS_TILE, v1 + ATLAS_TILE);
    uvs.extend_from_slice(&[u1, v2, u1, v1, u2, v1, u2, v2]);
}

/// Top-left UV corner of atlas tile `n`.
pub fn tile_origin(n: usize) -> (f32, f32) {
    debug_assert!(n < Nswe::COMBINATIONS, "tile index out of range: {n}");
    (
        (n / ATLAS_ROWS_COLS) as f32 * ATLAS_TILE,
        (n % ATLAS_ROWS_COLS) as f32 * ATLAS_TILE,
    )
}
