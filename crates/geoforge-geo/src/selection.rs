use crate::coords::Vec3;

/// Interaction state of a cell, set by the editor UI.
///
/// Pure tag: the render color rules keyed by this state live in the
/// renderer's color table.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum SelectionState {
    #[default]
    Normal,
    Highlighted,
    Selected,
}

/// Axis-aligned world-space selection box.
///
/// Corners are normalized on construction so `min <= max` per component;
/// the two input corners may be given in any order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SelectionBox {
    min: Vec3,
    max: Vec3,
}

impl SelectionBox {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    #[inline]
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── SelectionBox ──────────────────────────────────────────────────────

    #[test]
    fn corners_are_normalized() {
        let b = SelectionBox::new(Vec3::new(4.0, 1.0, -2.0), Vec3::new(0.0, 3.0, 2.0));
        assert_eq!(b.min(), Vec3::new(0.0, 1.0, -2.0));
        assert_eq!(b.max(), Vec3::new(4.0, 3.0, 2.0));
    }

    #[test]
    fn containment_is_inclusive() {
        let b = SelectionBox::new(Vec3::zero(), Vec3::new(2.0, 2.0, 2.0));
        assert!(b.contains(Vec3::zero()));
        assert!(b.contains(Vec3::new(2.0, 2.0, 2.0)));
        assert!(b.contains(Vec3::new(1.0, 0.5, 1.5)));
        assert!(!b.contains(Vec3::new(2.1, 1.0, 1.0)));
        assert!(!b.contains(Vec3::new(1.0, -0.1, 1.0)));
    }

    // ── SelectionState ────────────────────────────────────────────────────

    #[test]
    fn default_state_is_normal() {
        assert_eq!(SelectionState::default(), SelectionState::Normal);
    }
}
