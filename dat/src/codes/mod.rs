//! Closed enumerations mapping machine settings and needle operations to palette indices.
//!
//! Every table here is part of the on-disk DAT format; the numeric values are fixed by the
//! machine and must not drift.

// FIXED COLOR CODES
// ================================================================================================

/// Option lines on each side of the pattern band.
pub const OPTION_LINE_COUNT: usize = 20;

/// Carrier-number pixel for a pass that carries no yarn.
pub const NO_CARRIERS: u8 = 255;

/// The color of the ruler row the inverse parser measures the pattern width from.
pub const WIDTH_SPECIFIER: u8 = 1;

/// Delimits the pattern band on both sides of every pass row.
pub const STOPPING_MARK: u8 = 13;

mod operations;
pub use operations::{OperationColor, operation_color};

mod options;
pub use options::{
    AmissSplitHookColor, DirectionColor, DropSinkerColor, HookOperationColor, KnitCancelColor,
    LeftLine, LinksProcessColor, PauseColor, PresserMode, RackAlignmentColor, RackDirectionColor,
    RightLine, TransferTypeColor, carriers_to_int, pixel_to_carriers,
};
