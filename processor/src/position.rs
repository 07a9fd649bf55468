use knitout_core::{MachineSpec, Position};
use log::info;

use crate::ScheduleError;

// POSITIONING POLICY
// ================================================================================================

/// Resolves where the pattern sits on the needle bed.
///
/// Given the slot extent of the scheduled program, returns the needle offset the machine should
/// place slot 0 at. `Keep` is the only policy that can fail: the written needle numbers must
/// already fit on the bed.
pub fn position_offset(
    spec: &MachineSpec,
    leftmost: i32,
    rightmost: i32,
) -> Result<i32, ScheduleError> {
    info!("will {} as per position specification", spec.position.description());
    let offset = match spec.position {
        Position::Center => {
            let width = if rightmost >= leftmost { rightmost - leftmost + 1 } else { 0 };
            (f64::from(spec.needle_count - width) / 2.0).round() as i32
        },
        Position::Keep => {
            if leftmost > 0 && rightmost <= spec.needle_count {
                leftmost
            } else {
                return Err(ScheduleError::KnittingRangeOutsideBed {
                    leftmost,
                    rightmost,
                    bed_width: spec.needle_count,
                });
            }
        },
        // the machine auto-places right-justified patterns
        Position::Right => 0,
        Position::Left => 1,
    };
    Ok(offset)
}

// TESTS
// ================================================================================================
