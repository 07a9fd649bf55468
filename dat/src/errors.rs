use knitout_core::CarrierId;

// RASTER ERROR
// ================================================================================================

/// Errors raised while turning scheduled passes into raster rows and DAT bytes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("racking value {rack} exceeds the machine maximum of {max_rack}")]
    RackExceedsMachine { rack: i32, max_rack: i32 },
    #[error(
        "operations with colors {first} and {second} cannot share slot {slot}; only opposite-bed \
         knits and tucks combine under all-needle racking"
    )]
    InvalidAllNeedle { slot: i32, first: u8, second: u8 },
    #[error("cannot inhook on a rightward knitting pass")]
    InhookOnRightwardPass,
    #[error("cannot {operation} carrier {carrier}: it has no position on the bed")]
    CarrierNotOnBed { carrier: CarrierId, operation: &'static str },
    #[error("releasehook of carrier {carrier} but no carrier is on the yarn-inserting hook")]
    HookNotActive { carrier: CarrierId },
    #[error("the program performs no needle operations, there is nothing to raster")]
    EmptyPattern,
    #[error("raster row is {actual} pixels wide but the file is {expected} pixels wide")]
    RowWidthMismatch { expected: usize, actual: usize },
}

// DAT READ ERROR
// ================================================================================================

/// Errors raised while reading a DAT file back into knitout instructions.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DatReadError {
    #[error("file is {len} bytes, too short to hold a DAT header and palette")]
    TruncatedFile { len: usize },
    #[error("invalid DAT file: magic numbers are {magic1}, {magic2}, expected 1000, 1000")]
    BadDatMagic { magic1: u16, magic2: u16 },
    #[error("run-length data decodes to {actual} rows but the header promises {expected}")]
    RasterSizeMismatch { expected: usize, actual: usize },
    #[error("no width-specifier row found; the file does not look like compiled knitout")]
    MissingWidthSpecifier,
    #[error("only {rows} pass rows remain, too few to hold the startup and finish sequences")]
    MissingSequences { rows: usize },
    #[error("pass row is only {len} pixels wide after trimming, too narrow for the option blocks")]
    RowTooNarrow { len: usize },
    #[error("option block carries {code} on line {line}, which is not a known setting value")]
    UnknownOptionValue { line: usize, code: u8 },
    #[error("pixel value {0} does not correspond to any valid carrier encoding")]
    UndecodableCarrierInteger(u8),
    #[error("pattern-band pixel {code} is not a known operation color")]
    UnknownOperationColor { code: u8 },
    #[error("releasehook row appears while no carrier is on the yarn-inserting hook")]
    ReleaseWithoutInhook,
}
