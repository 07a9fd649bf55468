//! Pipeline drivers for the knitout ⇄ DAT compiler.
//!
//! The forward path parses knitout text, folds it into carriage passes, schedules the kickbacks
//! that keep idle carriers clear of every pass, and renders the result into the DAT raster
//! container. The reverse path inverts the raster back into knitout text.

use std::{fs, path::Path};

use knitout_core::MachineSpec;
use knitout_dat::{RasterParams, compile_schedule, read_dat};
use knitout_processor::{position_offset, schedule_program};
use knitout_syntax::{parse_program, write_knitout};

// CONVERT ERROR
// ================================================================================================

/// Any failure on the way from knitout text to DAT bytes or back.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("failed to parse knitout")]
    Parse(#[from] knitout_syntax::ParseError),
    #[error("failed to schedule carriage passes")]
    Schedule(#[from] knitout_processor::ScheduleError),
    #[error("failed to raster the pattern")]
    Raster(#[from] knitout_dat::RasterError),
    #[error("failed to read the DAT file")]
    DatRead(#[from] knitout_dat::DatReadError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// FORWARD PATH
// ================================================================================================

/// Compiles knitout text into the bytes of a DAT file.
pub fn knitout_to_dat(knitout: &str) -> Result<Vec<u8>, ConvertError> {
    let program = parse_program(knitout)?;
    let schedule = schedule_program(&program)?;
    let offset =
        position_offset(&program.spec, schedule.leftmost_slot, schedule.rightmost_slot)?;
    log::info!(
        "pattern uses slots {}..{} ({} needles) at offset {offset}",
        schedule.leftmost_slot,
        schedule.rightmost_slot,
        schedule.knitting_width(),
    );
    Ok(compile_schedule(&schedule, &program.spec, &RasterParams::default())?)
}

/// Compiles a knitout file on disk into a DAT file.
pub fn convert_file(input: &Path, output: &Path) -> Result<(), ConvertError> {
    let knitout = fs::read_to_string(input)?;
    let bytes = knitout_to_dat(&knitout)?;
    fs::write(output, bytes)?;
    Ok(())
}

// REVERSE PATH
// ================================================================================================

/// Reads DAT bytes back into knitout text.
pub fn dat_to_knitout(bytes: &[u8]) -> Result<String, ConvertError> {
    let instructions = read_dat(bytes)?;
    Ok(write_knitout(&MachineSpec::default(), &instructions))
}

/// Reads a DAT file on disk back into a knitout file.
pub fn invert_file(input: &Path, output: &Path) -> Result<(), ConvertError> {
    let bytes = fs::read(input)?;
    let knitout = dat_to_knitout(&bytes)?;
    fs::write(output, knitout)?;
    Ok(())
}
