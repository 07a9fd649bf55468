use alloc::vec::Vec;

use knitout_core::{
    CarrierId, CarrierSet, Direction, Instruction, Needle, NeedleOp, OpKind, RackState,
};

use crate::{
    DatReadError, RasterParams,
    codes::{
        DirectionColor, HookOperationColor, LeftLine, OPTION_LINE_COUNT, OperationColor,
        RightLine, STOPPING_MARK, WIDTH_SPECIFIER, pixel_to_carriers,
    },
    encode::{DAT_MAGIC, DATA_OFFSET},
};

// DAT READER
// ================================================================================================

/// Reads a DAT file back into the knitout instruction stream it encodes.
///
/// The inverse of the forward pipeline: decode the run-length body into a pixel grid, strip the
/// buffers and the width ruler, drop the fixed startup and finish sequences, then invert each
/// remaining row's option blocks and pattern band. Soft-miss kicks are carrier management, not
/// knitting; they are skipped on the way out.
pub fn read_dat(bytes: &[u8]) -> Result<Vec<Instruction>, DatReadError> {
    let params = RasterParams::default();
    let grid = decode_grid(bytes)?;

    // drop empty rows, then the margins of each remaining row
    let mut rows: Vec<Vec<u8>> = grid
        .into_iter()
        .filter(|row| row.iter().any(|&p| p != 0))
        .map(trim_row)
        .collect();

    // the topmost all-specifier row is the width ruler; everything above it is margin
    let ruler = rows
        .iter()
        .enumerate()
        .rev()
        .find(|(_, row)| !row.is_empty() && row.iter().all(|&p| p == WIDTH_SPECIFIER))
        .map(|(index, _)| index)
        .ok_or(DatReadError::MissingWidthSpecifier)?;
    rows.truncate(ruler);

    // fixed three-row startup and finish sequences
    if rows.len() < 6 {
        return Err(DatReadError::MissingSequences { rows: rows.len() });
    }
    rows.drain(..3);
    rows.truncate(rows.len() - 3);

    let mut reader = ProcessReader::default();
    for row in &rows {
        reader.read_row(row, &params)?;
    }
    Ok(reader.out)
}

// CONTAINER DECODING
// ================================================================================================

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Validates the header and decodes the run-length body into rows of pixels.
fn decode_grid(bytes: &[u8]) -> Result<Vec<Vec<u8>>, DatReadError> {
    if bytes.len() < DATA_OFFSET {
        return Err(DatReadError::TruncatedFile { len: bytes.len() });
    }
    let magic1 = read_u16(bytes, 0x08);
    let magic2 = read_u16(bytes, 0x10);
    if magic1 != DAT_MAGIC || magic2 != DAT_MAGIC {
        return Err(DatReadError::BadDatMagic { magic1, magic2 });
    }
    let width = read_u16(bytes, 0x04).saturating_sub(read_u16(bytes, 0x00)) as usize + 1;
    let height = read_u16(bytes, 0x06).saturating_sub(read_u16(bytes, 0x02)) as usize + 1;
    log::debug!("dat raster is {width} x {height} pixels");

    let mut rows = Vec::with_capacity(height);
    let mut row = Vec::with_capacity(width);
    for pair in bytes[DATA_OFFSET..].chunks_exact(2) {
        for _ in 0..pair[1] {
            row.push(pair[0]);
            if row.len() == width {
                rows.push(core::mem::take(&mut row));
            }
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    if rows.len() != height {
        return Err(DatReadError::RasterSizeMismatch { expected: height, actual: rows.len() });
    }
    Ok(rows)
}

/// Trims a row's zero margins, keeping the zero adjacent to a line-20 pixel: the outermost
/// option value is meaningful even when it is zero.
fn trim_row(row: Vec<u8>) -> Vec<u8> {
    let Some(mut start) = row.iter().position(|&p| p != 0) else {
        return Vec::new();
    };
    if row[start] == 20 && start > 0 {
        start -= 1;
    }
    let mut end = row.iter().rposition(|&p| p != 0).expect("row has a non-zero pixel") + 1;
    if row[end - 1] == 20 && end < row.len() {
        end += 1;
    }
    row[start..end].to_vec()
}

// ROW DECODING
// ================================================================================================

const BLOCK: usize = 2 * OPTION_LINE_COUNT;

/// The machine settings recovered from one row's two option blocks.
struct RowOptions {
    direction: Option<Direction>,
    rack: RackState,
    pause: bool,
    hook: HookOperationColor,
    gripper: u8,
    carriers: Option<CarrierSet>,
}

impl RowOptions {
    fn parse(row: &[u8]) -> Result<Self, DatReadError> {
        if row.len() < 2 * BLOCK + 2 {
            return Err(DatReadError::RowTooNarrow { len: row.len() });
        }
        let left = &row[..BLOCK];
        let right = &row[row.len() - BLOCK..];

        // the left block is stored reversed: line n's value pixel sits at 40 - 2n
        let left_value = |line: LeftLine| {
            let number = line.number();
            if number == 1 { left[BLOCK - 1] } else { left[BLOCK - 2 * number] }
        };
        let right_value = |line: RightLine| {
            let number = line.number();
            if number == 1 { right[0] } else { right[2 * number - 1] }
        };

        let direction_code = right_value(RightLine::Direction);
        let direction = DirectionColor::from_code(direction_code)
            .ok_or(DatReadError::UnknownOptionValue { line: 1, code: direction_code })?
            .direction();

        let pitch = i32::from(left_value(LeftLine::RackPitch));
        let rack = match left_value(LeftLine::RackDirection) {
            11 => pitch + 1,
            10 | 0 => -pitch,
            code => return Err(DatReadError::UnknownOptionValue { line: 4, code }),
        };
        let all_needle = left_value(LeftLine::RackAlignment) == 1;

        let hook_code = right_value(RightLine::HookOperation);
        let hook = HookOperationColor::from_code(hook_code)
            .ok_or(DatReadError::UnknownOptionValue { line: 15, code: hook_code })?;

        Ok(Self {
            direction,
            rack: RackState::new(rack, all_needle),
            pause: left_value(LeftLine::Pause) != 0,
            hook,
            gripper: right_value(RightLine::CarrierGripper),
            carriers: pixel_to_carriers(right_value(RightLine::CarrierNumber))?,
        })
    }
}

/// Rebuilds the needle operations drawn in a row's pattern band.
fn decode_band(
    band: &[u8],
    options: &RowOptions,
) -> Result<Vec<NeedleOp>, DatReadError> {
    let mut ops = Vec::new();
    for (index, &pixel) in band.iter().enumerate() {
        if pixel == 0 || pixel == STOPPING_MARK {
            continue;
        }
        let slot = index as i32 - 1;
        let color = OperationColor::from_code(pixel)
            .ok_or(DatReadError::UnknownOperationColor { code: pixel })?;
        push_ops(&mut ops, color, slot, options);
    }
    // operations are gathered left to right; leftward passes visit them in reverse
    if options.direction == Some(Direction::Leftward) {
        ops.reverse();
    }
    Ok(ops)
}

fn push_ops(ops: &mut Vec<NeedleOp>, color: OperationColor, slot: i32, options: &RowOptions) {
    let front = Needle::front(slot);
    let back = Needle::back(slot - options.rack.rack);
    let op = |kind: OpKind, needle: Needle| NeedleOp {
        kind,
        needle,
        direction: options.direction,
        carriers: options.carriers.clone(),
    };
    let xfer = |needle: Needle, target: Needle| NeedleOp {
        kind: OpKind::Xfer { target },
        needle,
        direction: None,
        carriers: None,
    };
    match color {
        OperationColor::KnitFront => ops.push(op(OpKind::Knit, front)),
        OperationColor::KnitBack => ops.push(op(OpKind::Knit, back)),
        OperationColor::TuckFront => ops.push(op(OpKind::Tuck, front)),
        OperationColor::TuckBack => ops.push(op(OpKind::Tuck, back)),
        OperationColor::MissFront => ops.push(op(OpKind::Miss, front)),
        OperationColor::MissBack => ops.push(op(OpKind::Miss, back)),
        OperationColor::SoftMiss => ops.push(op(OpKind::Kick, front)),
        OperationColor::XferToBack => ops.push(xfer(front, back)),
        OperationColor::XferToFront => ops.push(xfer(back, front)),
        OperationColor::SplitToBack => ops.push(op(OpKind::Split { target: back }, front)),
        OperationColor::SplitToFront => ops.push(op(OpKind::Split { target: front }, back)),
        OperationColor::KnitFrontKnitBack => {
            ops.push(op(OpKind::Knit, front));
            ops.push(op(OpKind::Knit, back));
        },
        OperationColor::KnitFrontTuckBack => {
            ops.push(op(OpKind::Knit, front));
            ops.push(op(OpKind::Tuck, back));
        },
        OperationColor::TuckFrontKnitBack => {
            ops.push(op(OpKind::Tuck, front));
            ops.push(op(OpKind::Knit, back));
        },
        OperationColor::TuckFrontTuckBack => {
            ops.push(op(OpKind::Tuck, front));
            ops.push(op(OpKind::Tuck, back));
        },
    }
}

// PROCESS RECONSTRUCTION
// ================================================================================================

/// Accumulates instructions row by row, mirroring the forward pipeline's machine state: racking
/// changes and hook operations emit their own instructions in the right order.
#[derive(Default)]
struct ProcessReader {
    rack: RackState,
    gripper: Option<CarrierId>,
    out: Vec<Instruction>,
}

impl ProcessReader {
    fn read_row(&mut self, row: &[u8], params: &RasterParams) -> Result<(), DatReadError> {
        if row.len() < 2 * BLOCK + 2 * params.pattern_space + 2 {
            return Err(DatReadError::RowTooNarrow { len: row.len() });
        }
        let options = RowOptions::parse(row)?;
        let band = &row[BLOCK + params.pattern_space..row.len() - BLOCK - params.pattern_space];
        let ops = decode_band(band, &options)?;
        let knitting: Vec<NeedleOp> =
            ops.into_iter().filter(|op| !op.kind.is_kick()).collect();

        // soft-miss rows carry rack zero; only rows that knit may change the racking
        if !knitting.is_empty() && options.rack != self.rack {
            self.rack = options.rack;
            self.out.push(Instruction::Rack(options.rack));
        }

        match options.hook {
            HookOperationColor::InHook => {
                let carrier = single_carrier(options.gripper)?;
                self.gripper = Some(carrier);
                self.out.push(Instruction::Inhook(carrier));
            },
            HookOperationColor::ReleaseHook => {
                let carrier = self.gripper.take().ok_or(DatReadError::ReleaseWithoutInhook)?;
                self.out.push(Instruction::Releasehook(carrier));
                return Ok(());
            },
            _ => (),
        }

        if options.pause {
            self.out.push(Instruction::Pause);
        }
        self.out.extend(knitting.into_iter().map(Instruction::Needle));

        if options.hook == HookOperationColor::OutHook {
            let pixel = options
                .gripper
                .checked_sub(100)
                .ok_or(DatReadError::UndecodableCarrierInteger(options.gripper))?;
            self.out.push(Instruction::Outhook(single_carrier(pixel)?));
        }
        Ok(())
    }
}

/// Decodes a gripper pixel naming exactly one carrier.
fn single_carrier(pixel: u8) -> Result<CarrierId, DatReadError> {
    pixel_to_carriers(pixel)?
        .and_then(|set| set.first())
        .ok_or(DatReadError::UndecodableCarrierInteger(pixel))
}

// TESTS
// ================================================================================================
