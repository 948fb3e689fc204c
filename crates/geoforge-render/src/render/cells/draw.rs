use std::ops::Range;

use geoforge_geo::GeoCell;

use super::geometry::{BLOCK_INDEX_COUNT, BLOCK_MAX_LOCAL_INDEX, BLOCK_VERTEX_COUNT};

/// Index-buffer span and vertex bounds for one cell draw.
///
/// Pure data so both issuance modes (plain and draw-range) can be checked to
/// select the same sub-buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CellDraw {
    pub first_index: u32,
    pub index_count: u32,
    pub min_vertex: u32,
    pub max_vertex: u32,
}

impl CellDraw {
    /// Resolves the sub-buffer for `cell`: the reserved big block at offset
    /// zero for big cells, otherwise the configuration block at
    /// `nswe × 24 + 24` (the reserved slot shifts all configuration slots up
    /// by one block).
    pub fn for_cell(cell: &GeoCell) -> Self {
        let count = BLOCK_INDEX_COUNT as u32;
        let first_index = if cell.is_big() {
            0
        } else {
            cell.nswe().index() as u32 * count + count
        };

        let min_vertex = first_index / count * BLOCK_VERTEX_COUNT as u32;
        Self {
            first_index,
            index_count: count,
            min_vertex,
            max_vertex: min_vertex + BLOCK_MAX_LOCAL_INDEX as u32,
        }
    }

    /// Entry range into the shared index buffer (plain mode).
    #[inline]
    pub fn index_range(&self) -> Range<u32> {
        self.first_index..self.first_index + self.index_count
    }

    /// Byte range into the shared index buffer; draw-range mode binds only
    /// this window, declaring the touched bounds to the driver.
    #[inline]
    pub fn byte_range(&self) -> Range<u64> {
        let stride = std::mem::size_of::<u16>() as u64;
        u64::from(self.first_index) * stride..u64::from(self.first_index + self.index_count) * stride
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoforge_geo::{BlockType, CellId, CellSize, GeoBlock, Nswe, Vec3};

    fn cell(size: CellSize, nswe: u8) -> GeoCell {
        GeoCell::new(
            CellId::new(0, 0, 0),
            GeoBlock::new(0, 0, BlockType::Complex),
            size,
            Nswe::new(nswe),
            Vec3::zero(),
        )
    }

    #[test]
    fn big_cell_draws_the_reserved_block() {
        let d = CellDraw::for_cell(&cell(CellSize::Big, 0b0110));
        assert_eq!(d.index_range(), 0..24);
        assert_eq!(d.min_vertex, 0);
        assert_eq!(d.max_vertex, 11);
    }

    #[test]
    fn small_cell_offset_skips_the_reserved_slot() {
        for n in 0..Nswe::COMBINATIONS as u8 {
            let d = CellDraw::for_cell(&cell(CellSize::Small, n));
            let expected = u32::from(n) * 24 + 24;
            assert_eq!(d.index_range(), expected..expected + 24);
        }
    }

    #[test]
    fn vertex_bounds_cover_exactly_one_block() {
        let d = CellDraw::for_cell(&cell(CellSize::Small, 5));
        assert_eq!(d.min_vertex, 6 * 12);
        assert_eq!(d.max_vertex, 6 * 12 + 11);
    }

    #[test]
    fn both_issuance_modes_select_the_same_sub_buffer() {
        for n in 0..Nswe::COMBINATIONS as u8 {
            let d = CellDraw::for_cell(&cell(CellSize::Small, n));
            // Plain mode draws `index_range()` of the fully bound buffer;
            // range mode binds `byte_range()` and draws from zero. Equal
            // windows means equal geometry.
            let bytes = d.byte_range();
            assert_eq!(bytes.start, u64::from(d.index_range().start) * 2);
            assert_eq!(bytes.end, u64::from(d.index_range().end) * 2);
            assert_eq!(
                (bytes.end - bytes.start) / 2,
                u64::from(d.index_count),
            );
        }
    }
}
