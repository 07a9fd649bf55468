#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod errors;
pub use errors::ParseError;

mod header;

mod parser;
pub use parser::{KnitoutProgram, parse_program};

mod writer;
pub use writer::write_knitout;
