use core::fmt;

// CARRIAGE DIRECTION
// ================================================================================================

/// Direction of a carriage traversal along the needle beds.
///
/// Knitout spells rightward passes `+` and leftward passes `-`; the same glyphs are used when
/// instructions are written back out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Leftward,
    Rightward,
}

impl Direction {
    /// Returns the opposite carriage direction.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Leftward => Self::Rightward,
            Self::Rightward => Self::Leftward,
        }
    }

    /// Returns true if slot `next` lies strictly beyond slot `last` when traveling in this
    /// direction.
    pub const fn is_beyond(self, next: i32, last: i32) -> bool {
        match self {
            Self::Leftward => next < last,
            Self::Rightward => next > last,
        }
    }

    /// Returns the slot a pass traveling in this direction ends on, given the leftmost and
    /// rightmost slots it visits.
    pub const fn end_slot(self, leftmost: i32, rightmost: i32) -> i32 {
        match self {
            Self::Leftward => leftmost,
            Self::Rightward => rightmost,
        }
    }

    /// Returns the slot a pass traveling in this direction starts on.
    pub const fn start_slot(self, leftmost: i32, rightmost: i32) -> i32 {
        match self {
            Self::Leftward => rightmost,
            Self::Rightward => leftmost,
        }
    }

    /// Parses a knitout direction token (`+` or `-`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Self::Rightward),
            "-" => Some(Self::Leftward),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leftward => write!(f, "-"),
            Self::Rightward => write!(f, "+"),
        }
    }
}

// TESTS
// ================================================================================================
