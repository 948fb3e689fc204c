/// Wall configuration of a cell: which of the four cardinal directions are
/// open for movement.
///
/// Bit layout follows the legacy geodata encoding:
/// EAST = 1, WEST = 2, SOUTH = 4, NORTH = 8.
///
/// Values are always masked to the low four bits, so every `Nswe` is a valid
/// table index in `[0, 16)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Nswe(u8);

const EAST: u8 = 1 << 0;
const WEST: u8 = 1 << 1;
const SOUTH: u8 = 1 << 2;
const NORTH: u8 = 1 << 3;

impl Nswe {
    /// All walls closed.
    pub const NONE: Nswe = Nswe(0);

    /// All walls open.
    pub const ALL: Nswe = Nswe(EAST | WEST | SOUTH | NORTH);

    /// Number of distinct wall configurations.
    pub const COMBINATIONS: usize = 16;

    /// Builds a configuration from raw geodata bits. Bits above the NSWE
    /// nibble are discarded.
    #[inline]
    pub const fn new(bits: u8) -> Self {
        Nswe(bits & Self::ALL.0)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Table index in `[0, 16)`.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn east_open(self) -> bool {
        self.0 & EAST != 0
    }

    #[inline]
    pub const fn west_open(self) -> bool {
        self.0 & WEST != 0
    }

    #[inline]
    pub const fn south_open(self) -> bool {
        self.0 & SOUTH != 0
    }

    #[inline]
    pub const fn north_open(self) -> bool {
        self.0 & NORTH != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bits_are_masked() {
        assert_eq!(Nswe::new(0xFF), Nswe::ALL);
        assert_eq!(Nswe::new(0x10).bits(), 0);
        assert_eq!(Nswe::new(9).bits(), 9);
    }

    #[test]
    fn index_covers_all_combinations() {
        for raw in 0..Nswe::COMBINATIONS {
            assert_eq!(Nswe::new(raw as u8).index(), raw);
        }
    }

    #[test]
    fn direction_queries() {
        let n = Nswe::new(0b1001); // north + east
        assert!(n.north_open());
        assert!(n.east_open());
        assert!(!n.south_open());
        assert!(!n.west_open());
        assert!(Nswe::ALL.west_open());
        assert!(!Nswe::NONE.north_open());
    }
}
