use knitout_core::{CarriagePass, CarrierSet, Direction};

use super::NO_CARRIERS;
use crate::DatReadError;

// OPTION LINES
// ================================================================================================

/// The left-side option lines a pass writes.
///
/// Line numbers index into the 20-line option block; lines not listed here always carry zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeftLine {
    Direction = 1,
    RackPitch = 2,
    RackAlignment = 3,
    RackDirection = 4,
    KnitSpeed = 5,
    TransferSpeed = 6,
    Pause = 7,
    AmissSplitFlag = 12,
    TransferType = 13,
}

impl LeftLine {
    pub const ALL: [Self; 9] = [
        Self::Direction,
        Self::RackPitch,
        Self::RackAlignment,
        Self::RackDirection,
        Self::KnitSpeed,
        Self::TransferSpeed,
        Self::Pause,
        Self::AmissSplitFlag,
        Self::TransferType,
    ];

    pub const fn number(self) -> usize {
        self as usize
    }
}

/// The right-side option lines a pass writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RightLine {
    Direction = 1,
    CarrierNumber = 3,
    KnitCancel = 5,
    StitchNumber = 6,
    DropSinker = 7,
    LinksProcess = 9,
    CarrierGripper = 10,
    PresserMode = 11,
    ApplyStitchToTransfer = 13,
    HookOperation = 15,
}

impl RightLine {
    pub const ALL: [Self; 10] = [
        Self::Direction,
        Self::CarrierNumber,
        Self::KnitCancel,
        Self::StitchNumber,
        Self::DropSinker,
        Self::LinksProcess,
        Self::CarrierGripper,
        Self::PresserMode,
        Self::ApplyStitchToTransfer,
        Self::HookOperation,
    ];

    pub const fn number(self) -> usize {
        self as usize
    }
}

// OPTION VALUE COLORS
// ================================================================================================

/// Carriage direction as encoded on line 1 of both option blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionColor {
    Leftward = 7,
    Rightward = 6,
    Unspecified = 1,
}

impl DirectionColor {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            7 => Some(Self::Leftward),
            6 => Some(Self::Rightward),
            1 => Some(Self::Unspecified),
            _ => None,
        }
    }

    pub const fn of(direction: Option<Direction>) -> Self {
        match direction {
            Some(Direction::Leftward) => Self::Leftward,
            Some(Direction::Rightward) => Self::Rightward,
            None => Self::Unspecified,
        }
    }

    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Leftward => Some(Direction::Leftward),
            Self::Rightward => Some(Direction::Rightward),
            Self::Unspecified => None,
        }
    }
}

/// Yarn-inserting-hook operation, right line 15.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HookOperationColor {
    #[default]
    None = 0,
    InHook = 10,
    OutHook = 20,
    ReleaseHook = 90,
}

impl HookOperationColor {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            10 => Some(Self::InHook),
            20 => Some(Self::OutHook),
            90 => Some(Self::ReleaseHook),
            _ => None,
        }
    }
}

/// Knit-cancel / carriage-move setting, right line 5.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KnitCancelColor {
    #[default]
    Standard = 0,
    KnitCancel = 1,
    CarriageMove = 2,
}

impl KnitCancelColor {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Rack direction sign, left line 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RackDirectionColor {
    Left = 10,
    Right = 11,
}

/// Quarter-pitch rack alignment, left line 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RackAlignmentColor {
    Standard = 0,
    AllNeedle = 1,
}

/// Drop-failure / sinker-reset flag, right line 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropSinkerColor {
    Standard = 0,
    DropSinker = 11,
}

/// Pause flag, left line 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseColor {
    Pause = 20,
}

/// Links-process setting, right line 9; knitout output always ignores link processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinksProcessColor {
    Ignore = 1,
}

/// Split-hook flag on the left amiss line 12.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmissSplitHookColor {
    SplitHook = 10,
}

/// Transfer slider selection, left line 13. Sliders are outside the supported machine surface,
/// so passes always encode `NoSliders`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransferTypeColor {
    #[default]
    NoSliders = 0,
    ToSliders = 1,
    FromSliders = 3,
}

/// Presser mode, right line 11.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresserMode {
    On,
    #[default]
    Off,
    Auto,
}

impl PresserMode {
    const ON: u8 = 101;

    /// Resolves the option value for a pass. `Auto` engages the presser only for passes that
    /// stay on a single bed.
    pub fn option_value(self, pass: &CarriagePass) -> u8 {
        match self {
            Self::On => Self::ON,
            Self::Off => 0,
            Self::Auto => {
                if pass.has_front_needles() && pass.has_back_needles() {
                    0
                } else {
                    Self::ON
                }
            },
        }
    }
}

// CARRIER NUMBER ENCODING
// ================================================================================================

/// Encodes a carrier set as the carrier-number pixel (right line 3).
///
/// Plating pairs concatenate their decimal digits, with two exceptions because carrier 10 is two
/// digits wide; sets with more than two carriers fall back to the leading carrier.
pub fn carriers_to_int(carriers: Option<&CarrierSet>) -> u8 {
    let Some(set) = carriers else {
        return NO_CARRIERS;
    };
    match set.as_slice() {
        [] => NO_CARRIERS,
        &[id] => id,
        &[10, second] => 100 + second,
        &[first, 10] if first != 1 => first * 10,
        &[1, 10] => 110,
        &[first, second] => first * 10 + second,
        _ => set.first().expect("non-empty set"),
    }
}

/// Decodes a carrier-number pixel back into a carrier set.
///
/// The inverse of [carriers_to_int]; `0` and the no-carrier sentinel decode to `None`.
pub fn pixel_to_carriers(pixel: u8) -> Result<Option<CarrierSet>, DatReadError> {
    if pixel == 0 || pixel == NO_CARRIERS {
        return Ok(None);
    }
    if (1..=10).contains(&pixel) {
        return Ok(CarrierSet::new([pixel]).map(Some).expect("single carrier in range"));
    }
    // carrier 10 leading: 101..=109
    if (101..=109).contains(&pixel) {
        return CarrierSet::new([10, pixel - 100])
            .map(Some)
            .ok_or(DatReadError::UndecodableCarrierInteger(pixel));
    }
    // carrier 10 trailing: 20, 30, .. 90
    if pixel < 100 && pixel % 10 == 0 && pixel / 10 >= 2 {
        return CarrierSet::new([pixel / 10, 10])
            .map(Some)
            .ok_or(DatReadError::UndecodableCarrierInteger(pixel));
    }
    // two single-digit carriers
    if (11..=99).contains(&pixel) && pixel % 10 != 0 {
        return CarrierSet::new([pixel / 10, pixel % 10])
            .map(Some)
            .ok_or(DatReadError::UndecodableCarrierInteger(pixel));
    }
    Err(DatReadError::UndecodableCarrierInteger(pixel))
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests;
