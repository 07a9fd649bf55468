// CONSTANTS
// ================================================================================================

/// Carriers available on the supported machine class.
pub const DEFAULT_CARRIER_COUNT: u8 = 10;

/// Needles per inch.
pub const DEFAULT_GAUGE: u32 = 15;

/// Needles on each bed.
pub const DEFAULT_BED_WIDTH: i32 = 540;

/// Largest racking offset the carriage can be asked for.
const DEFAULT_MAX_RACK: i32 = 4;

// KNITTING POSITION
// ================================================================================================

/// Where the pattern is placed on the needle bed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    /// Center the design on the bed.
    Center,
    /// Use needle numbers exactly as written.
    Keep,
    /// Left-justify the design.
    #[default]
    Left,
    /// Right-justify the design (the machine handles the offset itself).
    Right,
}

impl Position {
    /// Parses a knitout `Position` header value.
    pub fn from_header_value(value: &str) -> Option<Self> {
        match value {
            "Center" => Some(Self::Center),
            "Keep" => Some(Self::Keep),
            "Left" => Some(Self::Left),
            "Right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Returns the human description printed when positioning is resolved.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Center => "center design on needle bed",
            Self::Keep => "use needle numbers as written",
            Self::Left => "left-justify design on needle bed",
            Self::Right => "right-justify design on needle bed",
        }
    }
}

// MACHINE SPECIFICATION
// ================================================================================================

/// Machine parameters resolved from the knitout header block.
///
/// Every field has a default; absent or malformed headers fall back to it with a warning rather
/// than failing the compile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineSpec {
    pub carrier_count: u8,
    pub position: Position,
    pub gauge: u32,
    pub needle_count: i32,
    pub max_rack: i32,
}

impl Default for MachineSpec {
    fn default() -> Self {
        Self {
            carrier_count: DEFAULT_CARRIER_COUNT,
            position: Position::default(),
            gauge: DEFAULT_GAUGE,
            needle_count: DEFAULT_BED_WIDTH,
            max_rack: DEFAULT_MAX_RACK,
        }
    }
}
