use knitout_core::CarrierSet;

// SCHEDULE ERROR
// ================================================================================================

/// Errors raised while grouping and scheduling carriage passes.
///
/// The scheduler never recovers locally; every failure carries enough context to identify the
/// offending pass.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error(
        "kick of carriers [{carriers}] lands at position {position}, outside the needle bed \
         [0, {bed_width}] (conflict zone {zone_left}..{zone_right}); the pattern is too wide for \
         the machine"
    )]
    PatternTooWide {
        position: i32,
        carriers: CarrierSet,
        bed_width: i32,
        zone_left: i32,
        zone_right: i32,
    },
    #[error(
        "knitting range {leftmost}..{rightmost} cannot be kept as written on a bed of \
         {bed_width} needles"
    )]
    KnittingRangeOutsideBed { leftmost: i32, rightmost: i32, bed_width: i32 },
}
