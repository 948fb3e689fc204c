use crate::block::GeoBlock;
use crate::coords::Vec3;
use crate::nswe::Nswe;
use crate::selection::SelectionState;

/// Cell footprint class.
///
/// Flat blocks render one `Big` cell covering the whole 8×8 sub-cell
/// footprint; subdivided blocks render `Small` cells one sub-grid unit wide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CellSize {
    Small,
    Big,
}

/// Grid identity of a cell: geo coordinates plus layer index.
///
/// Used for GUI-selection identity checks; multilayer blocks distinguish
/// stacked cells by `layer`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CellId {
    pub geo_x: i32,
    pub geo_y: i32,
    pub layer: u8,
}

impl CellId {
    #[inline]
    pub const fn new(geo_x: i32, geo_y: i32, layer: u8) -> Self {
        Self { geo_x, geo_y, layer }
    }
}

/// Smallest addressable unit of the geo grid; rendered as one geometry
/// instance.
///
/// Cells are owned and mutated by the editor. The renderer only reads them
/// through the per-frame render selection.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoCell {
    id: CellId,
    block: GeoBlock,
    size: CellSize,
    nswe: Nswe,
    render_pos: Vec3,
    selection_state: SelectionState,
}

impl GeoCell {
    #[inline]
    pub const fn new(id: CellId, block: GeoBlock, size: CellSize, nswe: Nswe, render_pos: Vec3) -> Self {
        Self {
            id,
            block,
            size,
            nswe,
            render_pos,
            selection_state: SelectionState::Normal,
        }
    }

    #[inline]
    pub const fn id(&self) -> CellId {
        self.id
    }

    #[inline]
    pub const fn block(&self) -> GeoBlock {
        self.block
    }

    #[inline]
    pub const fn size(&self) -> CellSize {
        self.size
    }

    #[inline]
    pub fn is_big(&self) -> bool {
        self.size == CellSize::Big
    }

    #[inline]
    pub const fn nswe(&self) -> Nswe {
        self.nswe
    }

    /// World position the renderer translates this cell's geometry to.
    #[inline]
    pub const fn render_pos(&self) -> Vec3 {
        self.render_pos
    }

    #[inline]
    pub const fn selection_state(&self) -> SelectionState {
        self.selection_state
    }

    pub fn set_selection_state(&mut self, state: SelectionState) {
        self.selection_state = state;
    }

    pub fn set_nswe(&mut self, nswe: Nswe) {
        self.nswe = nswe;
    }

    /// Moves the cell vertically (height edits change the render position).
    pub fn set_render_pos(&mut self, pos: Vec3) {
        self.render_pos = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;

    fn cell() -> GeoCell {
        GeoCell::new(
            CellId::new(8, 16, 0),
            GeoBlock::new(1, 2, BlockType::Complex),
            CellSize::Small,
            Nswe::ALL,
            Vec3::new(8.0, -3.5, 16.0),
        )
    }

    #[test]
    fn starts_in_normal_selection_state() {
        assert_eq!(cell().selection_state(), SelectionState::Normal);
    }

    #[test]
    fn size_class_drives_is_big() {
        let mut c = cell();
        assert!(!c.is_big());
        c = GeoCell::new(c.id(), c.block(), CellSize::Big, c.nswe(), c.render_pos());
        assert!(c.is_big());
    }

    #[test]
    fn mutators_update_state() {
        let mut c = cell();
        c.set_selection_state(SelectionState::Selected);
        c.set_nswe(Nswe::NONE);
        c.set_render_pos(Vec3::new(8.0, -2.0, 16.0));
        assert_eq!(c.selection_state(), SelectionState::Selected);
        assert_eq!(c.nswe(), Nswe::NONE);
        assert_eq!(c.render_pos().y, -2.0);
    }
}
