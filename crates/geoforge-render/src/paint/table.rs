use geoforge_geo::{BlockType, GeoCell, SelectionState};

use crate::config::ColorConfig;

use super::Color;

/// Alpha applied to every policy color, the GUI-selection override included.
pub const CELL_ALPHA: f32 = 0.7;

/// Darkening factor for the checkerboard's second variant.
const VARIANT2_SCALE: f32 = 0.85;

/// Per-channel lift for multilayer cells inside the active selection box.
/// Deliberately unclamped; see `Color::brightened`.
const BOXED_LIFT: f32 = 0.5;

/// Precomputed colors for one selection state.
///
/// Variant index 0/1 follows block checkerboard parity; `multilayer_boxed`
/// is the lifted pair used while a cell sits inside the selection box.
#[derive(Debug, Clone, PartialEq)]
pub struct StateColors {
    gui_selected: Color,
    flat: Color,
    complex: [Color; 2],
    multilayer: [Color; 2],
    multilayer_boxed: [Color; 2],
}

impl StateColors {
    fn from_bases(flat: u32, complex: u32, multilayer: u32) -> Self {
        let complex1 = Color::from_rgb_u24(complex, CELL_ALPHA);
        let multilayer1 = Color::from_rgb_u24(multilayer, CELL_ALPHA);
        let multilayer2 = multilayer1.scaled(VARIANT2_SCALE);

        Self {
            gui_selected: Color::new(1.0, 1.0, 0.0, CELL_ALPHA),
            flat: Color::from_rgb_u24(flat, CELL_ALPHA),
            complex: [complex1, complex1.scaled(VARIANT2_SCALE)],
            multilayer: [multilayer1, multilayer2],
            multilayer_boxed: [
                multilayer1.brightened(BOXED_LIFT),
                multilayer2.brightened(BOXED_LIFT),
            ],
        }
    }

    pub fn gui_selected(&self) -> Color {
        self.gui_selected
    }

    pub fn flat(&self) -> Color {
        self.flat
    }

    pub fn complex(&self) -> &[Color; 2] {
        &self.complex
    }

    pub fn multilayer(&self) -> &[Color; 2] {
        &self.multilayer
    }

    pub fn multilayer_boxed(&self) -> &[Color; 2] {
        &self.multilayer_boxed
    }
}

/// Color policy table: one `StateColors` per selection state.
///
/// Built once when the renderer is constructed and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    normal: StateColors,
    highlighted: StateColors,
    selected: StateColors,
}

impl ColorTable {
    pub fn from_config(colors: &ColorConfig) -> Self {
        Self {
            normal: StateColors::from_bases(
                colors.flat_normal,
                colors.complex_normal,
                colors.multilayer_normal,
            ),
            highlighted: StateColors::from_bases(
                colors.flat_highlighted,
                colors.complex_highlighted,
                colors.multilayer_highlighted,
            ),
            selected: StateColors::from_bases(
                colors.flat_selected,
                colors.complex_selected,
                colors.multilayer_selected,
            ),
        }
    }

    pub fn state(&self, state: SelectionState) -> &StateColors {
        match state {
            SelectionState::Normal => &self.normal,
            SelectionState::Highlighted => &self.highlighted,
            SelectionState::Selected => &self.selected,
        }
    }

    /// Resolves the draw color for one cell.
    ///
    /// Priority: GUI-selection override, then block type, then checkerboard
    /// parity (with selection-box containment deciding the multilayer pair).
    /// Pure function of its inputs.
    pub fn color_for(&self, cell: &GeoCell, inside_selection_box: bool, ui_selected: bool) -> Color {
        let colors = self.state(cell.selection_state());

        if ui_selected {
            return colors.gui_selected;
        }

        let variant = cell.block().parity() as usize;
        match cell.block().ty() {
            BlockType::Flat => colors.flat,
            BlockType::Complex => colors.complex[variant],
            BlockType::Multilayer => {
                if inside_selection_box {
                    colors.multilayer_boxed[variant]
                } else {
                    colors.multilayer[variant]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoforge_geo::{CellId, CellSize, GeoBlock, Nswe, Vec3};

    fn table() -> ColorTable {
        ColorTable::from_config(&ColorConfig::default())
    }

    fn cell_at(block_x: i32, block_y: i32, ty: BlockType) -> GeoCell {
        GeoCell::new(
            CellId::new(block_x * 8, block_y * 8, 0),
            GeoBlock::new(block_x, block_y, ty),
            CellSize::Small,
            Nswe::ALL,
            Vec3::zero(),
        )
    }

    // ── override priority ─────────────────────────────────────────────────

    #[test]
    fn gui_selection_beats_every_other_rule() {
        let t = table();
        let yellow = Color::new(1.0, 1.0, 0.0, CELL_ALPHA);
        for ty in [BlockType::Flat, BlockType::Complex, BlockType::Multilayer] {
            for inside in [false, true] {
                assert_eq!(t.color_for(&cell_at(2, 3, ty), inside, true), yellow);
            }
        }
    }

    // ── purity ────────────────────────────────────────────────────────────

    #[test]
    fn same_inputs_same_color() {
        let t = table();
        let c = cell_at(4, 7, BlockType::Multilayer);
        assert_eq!(t.color_for(&c, true, false), t.color_for(&c, true, false));
        assert_eq!(t.color_for(&c, false, false), t.color_for(&c, false, false));
    }

    // ── parity rule ───────────────────────────────────────────────────────

    #[test]
    fn same_parity_blocks_share_a_color() {
        let t = table();
        assert_eq!(
            t.color_for(&cell_at(2, 3, BlockType::Complex), false, false),
            t.color_for(&cell_at(4, 5, BlockType::Complex), false, false),
        );
    }

    #[test]
    fn different_parity_blocks_differ_for_complex_and_multilayer() {
        let t = table();
        for ty in [BlockType::Complex, BlockType::Multilayer] {
            assert_ne!(
                t.color_for(&cell_at(2, 3, ty), false, false),
                t.color_for(&cell_at(2, 4, ty), false, false),
            );
        }
    }

    #[test]
    fn flat_ignores_parity() {
        let t = table();
        assert_eq!(
            t.color_for(&cell_at(2, 3, BlockType::Flat), false, false),
            t.color_for(&cell_at(2, 4, BlockType::Flat), false, false),
        );
    }

    // ── variants ──────────────────────────────────────────────────────────

    #[test]
    fn variant2_is_darkened_variant1() {
        let s = table().state(SelectionState::Normal).clone();
        assert_eq!(s.complex()[1], s.complex()[0].scaled(0.85));
        assert_eq!(s.multilayer()[1], s.multilayer()[0].scaled(0.85));
    }

    #[test]
    fn selection_box_lifts_multilayer_colors() {
        let t = table();
        let c = cell_at(2, 3, BlockType::Multilayer);
        let plain = t.color_for(&c, false, false);
        let boxed = t.color_for(&c, true, false);
        assert_eq!(boxed, plain.brightened(0.5));
    }

    #[test]
    fn flat_and_complex_ignore_selection_box() {
        let t = table();
        for ty in [BlockType::Flat, BlockType::Complex] {
            let c = cell_at(2, 3, ty);
            assert_eq!(t.color_for(&c, false, false), t.color_for(&c, true, false));
        }
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn every_policy_color_carries_cell_alpha() {
        let t = table();
        for ty in [BlockType::Flat, BlockType::Complex, BlockType::Multilayer] {
            for inside in [false, true] {
                for ui in [false, true] {
                    let mut c = cell_at(3, 4, ty);
                    for state in [
                        SelectionState::Normal,
                        SelectionState::Highlighted,
                        SelectionState::Selected,
                    ] {
                        c.set_selection_state(state);
                        assert_eq!(t.color_for(&c, inside, ui).a, CELL_ALPHA);
                    }
                }
            }
        }
    }

    // ── states ────────────────────────────────────────────────────────────

    #[test]
    fn selection_state_picks_its_own_palette() {
        let t = table();
        let mut c = cell_at(2, 3, BlockType::Complex);
        let normal = t.color_for(&c, false, false);
        c.set_selection_state(SelectionState::Highlighted);
        let highlighted = t.color_for(&c, false, false);
        assert_ne!(normal, highlighted);
    }
}
