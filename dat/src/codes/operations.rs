use knitout_core::{NeedleOp, OpKind};

// OPERATION COLORS
// ================================================================================================

/// Palette indices for needle operations in the pattern band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperationColor {
    // miss operations
    SoftMiss = 16,
    MissFront = 216,
    MissBack = 217,

    // tuck operations
    TuckFront = 11,
    TuckBack = 12,

    // knit operations
    KnitFront = 51,
    KnitBack = 52,

    // all-needle combinations on one slot
    KnitFrontKnitBack = 3,
    KnitFrontTuckBack = 41,
    TuckFrontKnitBack = 42,
    TuckFrontTuckBack = 88,

    // transfer operations
    XferToBack = 20,
    XferToFront = 30,

    // split operations
    SplitToBack = 101,
    SplitToFront = 102,
}

impl OperationColor {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the operation color for a pattern-band pixel value.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            16 => Some(Self::SoftMiss),
            216 => Some(Self::MissFront),
            217 => Some(Self::MissBack),
            11 => Some(Self::TuckFront),
            12 => Some(Self::TuckBack),
            51 => Some(Self::KnitFront),
            52 => Some(Self::KnitBack),
            3 => Some(Self::KnitFrontKnitBack),
            41 => Some(Self::KnitFrontTuckBack),
            42 => Some(Self::TuckFrontKnitBack),
            88 => Some(Self::TuckFrontTuckBack),
            20 => Some(Self::XferToBack),
            30 => Some(Self::XferToFront),
            101 => Some(Self::SplitToBack),
            102 => Some(Self::SplitToFront),
            _ => None,
        }
    }

    /// True for single-bed operations worked on the front bed.
    pub const fn is_front(self) -> bool {
        matches!(
            self,
            Self::KnitFront | Self::TuckFront | Self::MissFront | Self::SplitToBack | Self::XferToBack
        )
    }

    /// True for single-bed operations worked on the back bed.
    pub const fn is_back(self) -> bool {
        matches!(
            self,
            Self::KnitBack | Self::TuckBack | Self::MissBack | Self::SplitToFront | Self::XferToFront
        )
    }

    /// True for the single-bed knits and tucks that may combine on one slot.
    pub const fn can_all_needle(self) -> bool {
        matches!(self, Self::KnitFront | Self::KnitBack | Self::TuckFront | Self::TuckBack)
    }

    /// Combines this operation with an opposite-bed operation on the same slot, returning the
    /// composite all-needle color, or `None` when the two cannot share a slot.
    pub fn all_needle_with(self, other: Self) -> Option<Self> {
        if !self.can_all_needle() || !other.can_all_needle() {
            return None;
        }
        let (front, back) = if self.is_front() && other.is_back() {
            (self, other)
        } else if self.is_back() && other.is_front() {
            (other, self)
        } else {
            return None;
        };
        match (front, back) {
            (Self::KnitFront, Self::KnitBack) => Some(Self::KnitFrontKnitBack),
            (Self::KnitFront, Self::TuckBack) => Some(Self::KnitFrontTuckBack),
            (Self::TuckFront, Self::KnitBack) => Some(Self::TuckFrontKnitBack),
            (Self::TuckFront, Self::TuckBack) => Some(Self::TuckFrontTuckBack),
            _ => None,
        }
    }
}

/// Returns the operation color for a single needle instruction.
pub fn operation_color(op: &NeedleOp) -> OperationColor {
    let front = op.needle.bed.is_front();
    match op.kind {
        OpKind::Knit => {
            if front {
                OperationColor::KnitFront
            } else {
                OperationColor::KnitBack
            }
        },
        OpKind::Tuck => {
            if front {
                OperationColor::TuckFront
            } else {
                OperationColor::TuckBack
            }
        },
        OpKind::Kick => OperationColor::SoftMiss,
        OpKind::Miss => {
            if front {
                OperationColor::MissFront
            } else {
                OperationColor::MissBack
            }
        },
        OpKind::Split { .. } => {
            if front {
                OperationColor::SplitToBack
            } else {
                OperationColor::SplitToFront
            }
        },
        OpKind::Xfer { .. } => {
            if front {
                OperationColor::XferToBack
            } else {
                OperationColor::XferToFront
            }
        },
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::OperationColor;

    #[test]
    fn codes_round_trip() {
        for color in [
            OperationColor::SoftMiss,
            OperationColor::MissFront,
            OperationColor::MissBack,
            OperationColor::TuckFront,
            OperationColor::TuckBack,
            OperationColor::KnitFront,
            OperationColor::KnitBack,
            OperationColor::KnitFrontKnitBack,
            OperationColor::KnitFrontTuckBack,
            OperationColor::TuckFrontKnitBack,
            OperationColor::TuckFrontTuckBack,
            OperationColor::XferToBack,
            OperationColor::XferToFront,
            OperationColor::SplitToBack,
            OperationColor::SplitToFront,
        ] {
            assert_eq!(OperationColor::from_code(color.code()), Some(color));
        }
        assert_eq!(OperationColor::from_code(0), None);
        assert_eq!(OperationColor::from_code(13), None);
    }

    #[test]
    fn all_needle_combinations() {
        use OperationColor::*;
        assert_eq!(KnitFront.all_needle_with(KnitBack), Some(KnitFrontKnitBack));
        assert_eq!(KnitBack.all_needle_with(KnitFront), Some(KnitFrontKnitBack));
        assert_eq!(KnitFront.all_needle_with(TuckBack), Some(KnitFrontTuckBack));
        assert_eq!(TuckFront.all_needle_with(KnitBack), Some(TuckFrontKnitBack));
        assert_eq!(TuckBack.all_needle_with(TuckFront), Some(TuckFrontTuckBack));

        // same bed and non-loop operations never combine
        assert_eq!(KnitFront.all_needle_with(TuckFront), None);
        assert_eq!(KnitFront.all_needle_with(MissBack), None);
        assert_eq!(XferToBack.all_needle_with(XferToFront), None);
    }
}
