#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod codes;

mod palette;
pub use palette::PALETTE;

mod errors;
pub use errors::{DatReadError, RasterError};

mod raster;
pub use raster::{RasterParams, RasterPass};

mod sequences;
pub use sequences::{finish_rasters, startup_rasters};

mod rasterize;
pub use rasterize::rasterize_schedule;

mod encode;
pub use encode::{build_raster_grid, encode_dat, run_length_encode};

mod decode;
pub use decode::read_dat;

mod compile;
pub use compile::compile_schedule;
