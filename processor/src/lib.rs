#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod errors;
pub use errors::ScheduleError;

mod grouper;
pub use grouper::{ScheduleElement, group_instructions};

mod carriers;
pub use carriers::{CarrierState, CarrierTracker, STOPPING_DISTANCE};

mod kickback;
pub use kickback::{Schedule, schedule_kickbacks};

mod position;
pub use position::position_offset;

use knitout_syntax::KnitoutProgram;

// PIPELINE ENTRY
// ================================================================================================

/// Groups a parsed program into carriage passes and schedules the kickbacks that keep idle
/// carriers out of the way of every pass.
pub fn schedule_program(program: &KnitoutProgram) -> Result<Schedule, ScheduleError> {
    let elements = group_instructions(&program.instructions);
    schedule_kickbacks(elements, &program.spec)
}
