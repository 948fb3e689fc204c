/// Straight-alpha RGBA color.
///
/// The cell pipeline blends with source-alpha blending, so components are
/// stored straight (not premultiplied).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from a packed `0xRRGGBB` integer (high byte ignored).
    #[inline]
    pub fn from_rgb_u24(rgb: u32, a: f32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f32 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f32 / 255.0,
            b: (rgb & 0xFF) as f32 / 255.0,
            a,
        }
    }

    /// RGB scaled by `f`; alpha unchanged.
    #[inline]
    pub fn scaled(self, f: f32) -> Self {
        Self::new(self.r * f, self.g * f, self.b * f, self.a)
    }

    /// RGB shifted by `d`; alpha unchanged.
    ///
    /// Channels are not clamped: a bright base can exceed 1.0, which the
    /// fragment stage saturates on output. Use [`Color::clamped`] when a
    /// range-safe value is required.
    #[inline]
    pub fn brightened(self, d: f32) -> Self {
        Self::new(self.r + d, self.g + d, self.b + d, self.a)
    }

    /// All channels clamped to [0, 1].
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn unpacks_rgb_u24() {
        let c = Color::from_rgb_u24(0xFF8000, 0.7);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 0.7);
    }

    #[test]
    fn high_byte_is_ignored() {
        assert_eq!(
            Color::from_rgb_u24(0xFF123456, 1.0),
            Color::from_rgb_u24(0x123456, 1.0)
        );
    }

    // ── derivation ────────────────────────────────────────────────────────

    #[test]
    fn scaled_leaves_alpha_untouched() {
        let c = Color::new(1.0, 0.5, 0.2, 0.7).scaled(0.85);
        assert_eq!(c.r, 0.85);
        assert_eq!(c.g, 0.5 * 0.85);
        assert_eq!(c.a, 0.7);
    }

    #[test]
    fn brightened_does_not_clamp() {
        // Known edge case: bright bases overflow the [0, 1] channel range.
        let c = Color::new(0.8, 0.9, 0.2, 0.7).brightened(0.5);
        assert!(c.r > 1.0);
        assert!(c.g > 1.0);
        assert_eq!(c.b, 0.7);
        assert_eq!(c.a, 0.7);
    }

    #[test]
    fn clamped_restores_valid_range() {
        let c = Color::new(1.3, -0.2, 0.5, 0.7).clamped();
        assert_eq!(c, Color::new(1.0, 0.0, 0.5, 0.7));
    }
}
