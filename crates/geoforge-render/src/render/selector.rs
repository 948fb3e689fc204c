use geoforge_geo::GeoCell;

/// Ordered list of cells to draw this frame.
///
/// The caller controls the order (e.g. back-to-front for correct transparent
/// blending); the renderer never reorders.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - `clear()` keeps allocated capacity, so the list can be rebuilt every
///   frame without reallocation once warmed
#[derive(Debug, Default)]
pub struct RenderSelection {
    cells: Vec<GeoCell>,
}

impl RenderSelection {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Clears recorded cells. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Appends a cell snapshot; insertion order is draw order.
    #[inline]
    pub fn push(&mut self, cell: GeoCell) {
        self.cells.push(cell);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&GeoCell> {
        self.cells.get(index)
    }

    #[inline]
    pub fn cells(&self) -> &[GeoCell] {
        &self.cells
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &GeoCell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoforge_geo::{BlockType, CellId, CellSize, GeoBlock, Nswe, Vec3};

    fn cell(geo_x: i32) -> GeoCell {
        GeoCell::new(
            CellId::new(geo_x, 0, 0),
            GeoBlock::new(geo_x / 8, 0, BlockType::Complex),
            CellSize::Small,
            Nswe::ALL,
            Vec3::new(geo_x as f32, 0.0, 0.0),
        )
    }

    #[test]
    fn preserves_insertion_order() {
        let mut sel = RenderSelection::new();
        for x in [5, 1, 9, 3] {
            sel.push(cell(x));
        }
        let order: Vec<i32> = sel.iter().map(|c| c.id().geo_x).collect();
        assert_eq!(order, vec![5, 1, 9, 3]);
    }

    #[test]
    fn indexable_and_length_queryable() {
        let mut sel = RenderSelection::with_capacity(4);
        sel.push(cell(7));
        sel.push(cell(2));
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.get(1).map(|c| c.id().geo_x), Some(2));
        assert!(sel.get(2).is_none());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut sel = RenderSelection::new();
        for x in 0..64 {
            sel.push(cell(x));
        }
        let cap = sel.cells.capacity();
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.cells.capacity(), cap);
    }
}
