//! Renderer configuration.
//!
//! Plain `Default`-able structs; the editor shell fills these from its
//! settings store before constructing the renderer.

/// Base colors for the cell color policy, packed `0xRRGGBB` (high byte
/// ignored).
///
/// One entry per selection state × block type. Derived variants (checkerboard
/// darkening, selection-box lift, fixed alpha) are computed by the color
/// table, not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorConfig {
    pub flat_normal: u32,
    pub complex_normal: u32,
    pub multilayer_normal: u32,

    pub flat_highlighted: u32,
    pub complex_highlighted: u32,
    pub multilayer_highlighted: u32,

    pub flat_selected: u32,
    pub complex_selected: u32,
    pub multilayer_selected: u32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            flat_normal: 0x00B04F,
            complex_normal: 0x2F6FD0,
            multilayer_normal: 0xC03A2B,

            flat_highlighted: 0x46D97E,
            complex_highlighted: 0x5E9BFF,
            multilayer_highlighted: 0xE8654F,

            flat_selected: 0xFFD23C,
            complex_selected: 0xFFA23C,
            multilayer_selected: 0xFF6A3C,
        }
    }
}

/// Cell renderer configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderConfig {
    /// Issue draws through narrowed index-buffer bindings, declaring the
    /// touched window to the driver. Both modes produce identical geometry.
    pub draw_range: bool,

    /// Base colors for the color policy.
    pub colors: ColorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_distinct_per_block_type() {
        let c = ColorConfig::default();
        assert_ne!(c.flat_normal, c.complex_normal);
        assert_ne!(c.complex_normal, c.multilayer_normal);
        assert_ne!(c.flat_normal, c.flat_highlighted);
    }

    #[test]
    fn draw_range_defaults_off() {
        assert!(!RenderConfig::default().draw_range);
    }
}
