use alloc::vec::Vec;
use core::iter::repeat_n;

use crate::{
    RasterError, RasterParams, RasterPass,
    codes::WIDTH_SPECIFIER,
};

// CONTAINER CONSTANTS
// ================================================================================================

pub(crate) const HEADER_SIZE: usize = 0x200;
/// 768 palette bytes padded out to 0x400.
pub(crate) const PALETTE_SECTION_SIZE: usize = 0x400;
pub(crate) const DATA_OFFSET: usize = HEADER_SIZE + PALETTE_SECTION_SIZE;

pub(crate) const DAT_MAGIC: u16 = 1000;

// RASTER GRID
// ================================================================================================

/// Stacks the raster rows of a compiled program into the full pixel grid.
///
/// Bottom margin, startup rows, pattern rows, finish rows, a blank row, the width-specifier
/// ruler, and the top margin, in that order. Every row must come out at the same width.
pub fn build_raster_grid(
    startup: &[RasterPass],
    pattern: &[RasterPass],
    finish: &[RasterPass],
    pattern_width: i32,
    params: &RasterParams,
) -> Result<Vec<Vec<u8>>, RasterError> {
    let dat_width = RasterPass::raster_width(pattern_width, params);
    let blank = || vec![0u8; dat_width];
    // patterns that never touch slot 0 are drawn one slot lower
    let offset_slots = if pattern.iter().any(|raster| raster.covers_slot(0)) { 0 } else { -1 };

    let mut rows: Vec<Vec<u8>> = Vec::new();
    rows.extend((0..params.vertical_buffer).map(|_| blank()));
    for raster in startup {
        rows.push(raster.raster_row(pattern_width, params, 0));
    }
    for raster in pattern {
        rows.push(raster.raster_row(pattern_width, params, offset_slots));
    }
    for raster in finish {
        rows.push(raster.raster_row(pattern_width, params, 0));
    }
    rows.push(blank());
    rows.push(width_specifier_row(pattern_width, params));
    rows.extend((0..params.vertical_buffer + 1).map(|_| blank()));

    for row in &rows {
        if row.len() != dat_width {
            return Err(RasterError::RowWidthMismatch { expected: dat_width, actual: row.len() });
        }
    }
    Ok(rows)
}

/// The ruler row the inverse parser measures the pattern width from.
fn width_specifier_row(pattern_width: i32, params: &RasterParams) -> Vec<u8> {
    let margin = params.option_margin_width();
    let specifier = pattern_width.max(0) as usize + 2 * params.pattern_space + 2;
    let mut row = Vec::with_capacity(2 * margin + specifier);
    row.extend(repeat_n(0u8, margin));
    row.extend(repeat_n(WIDTH_SPECIFIER, specifier));
    row.extend(repeat_n(0u8, margin));
    row
}

// RUN-LENGTH ENCODING
// ================================================================================================

/// Run-length encodes the grid into `(color, length)` byte pairs.
///
/// The scan is row major; runs never cross a row boundary and are capped at 255 pixels.
pub fn run_length_encode(rows: &[Vec<u8>]) -> Vec<u8> {
    let mut pairs = Vec::new();
    for row in rows {
        let mut pixels = row.iter().copied();
        let Some(first) = pixels.next() else {
            continue;
        };
        let mut color = first;
        let mut length: u8 = 1;
        for pixel in pixels {
            if pixel == color && length < 255 {
                length += 1;
            } else {
                pairs.push(color);
                pairs.push(length);
                color = pixel;
                length = 1;
            }
        }
        pairs.push(color);
        pairs.push(length);
    }
    pairs
}

// CONTAINER
// ================================================================================================

/// Serialises the pixel grid into the DAT container: fixed header, fixed palette section, and
/// the run-length-encoded body.
pub fn encode_dat(rows: &[Vec<u8>]) -> Result<Vec<u8>, RasterError> {
    let Some(first) = rows.first() else {
        return Err(RasterError::EmptyPattern);
    };
    let width = first.len();
    for row in rows {
        if row.len() != width {
            return Err(RasterError::RowWidthMismatch { expected: width, actual: row.len() });
        }
    }

    let body = run_length_encode(rows);
    let mut buffer = vec![0u8; DATA_OFFSET + body.len()];

    // header fields are little-endian 16-bit: x/y extents and the two magic markers
    write_u16(&mut buffer, 0x00, 0);
    write_u16(&mut buffer, 0x02, 0);
    write_u16(&mut buffer, 0x04, (width - 1) as u16);
    write_u16(&mut buffer, 0x06, (rows.len() - 1) as u16);
    write_u16(&mut buffer, 0x08, DAT_MAGIC);
    write_u16(&mut buffer, 0x10, DAT_MAGIC);

    buffer[HEADER_SIZE..HEADER_SIZE + crate::PALETTE.len()].copy_from_slice(&crate::PALETTE);
    buffer[DATA_OFFSET..].copy_from_slice(&body);
    Ok(buffer)
}

fn write_u16(buffer: &mut [u8], offset: usize, value: u16) {
    buffer[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests;
