#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod carriers;
pub use carriers::{CarrierId, CarrierSet, MAX_CARRIER_ID};

mod direction;
pub use direction::Direction;

mod needle;
pub use needle::{Bed, Needle};

mod rack;
pub use rack::RackState;

mod machine;
pub use machine::{DEFAULT_BED_WIDTH, DEFAULT_CARRIER_COUNT, DEFAULT_GAUGE, MachineSpec, Position};

mod instruction;
pub use instruction::{Instruction, NeedleOp, OpKind};

mod pass;
pub use pass::{CarriagePass, PassKind};
