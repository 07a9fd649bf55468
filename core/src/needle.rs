use core::fmt;

// NEEDLE BEDS
// ================================================================================================

/// One of the two parallel needle beds of a flat-bed machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bed {
    Front,
    Back,
}

impl Bed {
    pub const fn is_front(self) -> bool {
        matches!(self, Self::Front)
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

// NEEDLE
// ================================================================================================

/// A needle location: a bed and a non-negative position on that bed.
///
/// Front-bed positions map to raster slots directly; back-bed positions map through the racking
/// offset of the pass they appear in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Needle {
    pub bed: Bed,
    pub position: i32,
}

impl Needle {
    pub const fn front(position: i32) -> Self {
        Self { bed: Bed::Front, position }
    }

    pub const fn back(position: i32) -> Self {
        Self { bed: Bed::Back, position }
    }

    /// Returns the front-bed slot this needle occupies under the specified racking offset.
    pub const fn slot(&self, rack: i32) -> i32 {
        match self.bed {
            Bed::Front => self.position,
            Bed::Back => self.position + rack,
        }
    }

    /// Returns the needle on the opposite bed that shares this needle's position.
    pub const fn opposite(&self) -> Self {
        Self { bed: self.bed.opposite(), position: self.position }
    }

    /// Parses a knitout needle token such as `f12` or `b3`.
    ///
    /// Slider beds (`fs`/`bs`) are not part of the supported machine surface.
    pub fn from_token(token: &str) -> Option<Self> {
        let (bed, digits) = match token.as_bytes().first()? {
            b'f' => (Bed::Front, &token[1..]),
            b'b' => (Bed::Back, &token[1..]),
            _ => return None,
        };
        let position: i32 = digits.parse().ok()?;
        if position < 0 {
            return None;
        }
        Some(Self { bed, position })
    }
}

impl fmt::Display for Needle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bed {
            Bed::Front => write!(f, "f{}", self.position),
            Bed::Back => write!(f, "b{}", self.position),
        }
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::{Bed, Needle};

    #[test]
    fn slot_applies_rack_to_back_bed_only() {
        assert_eq!(Needle::front(7).slot(2), 7);
        assert_eq!(Needle::back(7).slot(2), 9);
        assert_eq!(Needle::back(7).slot(-3), 4);
    }

    #[test]
    fn token_parsing() {
        assert_eq!(Needle::from_token("f12"), Some(Needle::front(12)));
        assert_eq!(Needle::from_token("b0"), Some(Needle::back(0)));
        assert_eq!(Needle::from_token("fs3"), None);
        assert_eq!(Needle::from_token("x2"), None);
        assert_eq!(Needle::from_token("f"), None);
    }

    #[test]
    fn display_round_trip() {
        for needle in [Needle::front(0), Needle::back(539)] {
            assert_eq!(Needle::from_token(&format!("{needle}")), Some(needle));
        }
        assert_eq!(Needle::front(1).opposite().bed, Bed::Back);
    }
}
