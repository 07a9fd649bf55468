use alloc::vec::Vec;

use knitout_core::MachineSpec;
use knitout_processor::Schedule;

use crate::{
    RasterError, RasterParams, build_raster_grid, encode_dat, finish_rasters, rasterize_schedule,
    startup_rasters,
};

// SCHEDULE COMPILATION
// ================================================================================================

/// Compiles a kick-scheduled program into the bytes of a DAT file.
///
/// Wraps the pattern rows in the startup and finish sequences sized to the knitting width,
/// stacks the grid, and serialises the container. Identical schedules produce identical bytes.
pub fn compile_schedule(
    schedule: &Schedule,
    spec: &MachineSpec,
    params: &RasterParams,
) -> Result<Vec<u8>, RasterError> {
    let width = schedule.knitting_width();
    if width < 1 {
        return Err(RasterError::EmptyPattern);
    }
    let startup = startup_rasters(width, spec)?;
    let pattern = rasterize_schedule(schedule, spec)?;
    let finish = finish_rasters(width, spec)?;
    let rows = build_raster_grid(&startup, &pattern, &finish, width, params)?;
    encode_dat(&rows)
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests;
