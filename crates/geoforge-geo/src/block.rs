/// Block type as stored in the geodata stream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockType {
    /// One height for the whole block; renders as a single big cell.
    Flat = 0,
    /// One cell per sub-grid position.
    Complex = 1,
    /// Multiple stacked layers per sub-grid position.
    Multilayer = 2,
}

/// A coarse grid unit aggregating 8×8 cells.
///
/// Copyable so cells can carry their owning block by value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GeoBlock {
    block_x: i32,
    block_y: i32,
    ty: BlockType,
}

impl GeoBlock {
    #[inline]
    pub const fn new(block_x: i32, block_y: i32, ty: BlockType) -> Self {
        Self { block_x, block_y, ty }
    }

    #[inline]
    pub const fn block_x(self) -> i32 {
        self.block_x
    }

    #[inline]
    pub const fn block_y(self) -> i32 {
        self.block_y
    }

    #[inline]
    pub const fn ty(self) -> BlockType {
        self.ty
    }

    /// Checkerboard parity over block coordinates, used by the render color
    /// policy to alternate shading between neighboring blocks.
    #[inline]
    pub const fn parity(self) -> bool {
        (self.block_x & 1) != (self.block_y & 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_alternates_like_a_checkerboard() {
        assert!(!GeoBlock::new(2, 4, BlockType::Complex).parity());
        assert!(!GeoBlock::new(3, 5, BlockType::Complex).parity());
        assert!(GeoBlock::new(2, 5, BlockType::Complex).parity());
        assert!(GeoBlock::new(3, 4, BlockType::Complex).parity());
    }

    #[test]
    fn parity_handles_negative_coordinates() {
        assert!(!GeoBlock::new(-2, 0, BlockType::Flat).parity());
        assert!(GeoBlock::new(-1, 0, BlockType::Flat).parity());
        assert!(!GeoBlock::new(-3, -5, BlockType::Flat).parity());
    }
}
