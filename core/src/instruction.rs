use alloc::string::String;
use core::fmt;

use crate::{CarrierId, CarrierSet, Direction, Needle, RackState};

// NEEDLE OPERATIONS
// ================================================================================================

/// The operation a needle instruction performs.
///
/// `Kick` is a soft miss: it moves carriers like a miss but is generated by the scheduler rather
/// than written by the user, and it never forms a loop. `Split` and `Xfer` carry the needle the
/// loop lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Knit,
    Tuck,
    Miss,
    Kick,
    Split { target: Needle },
    Xfer { target: Needle },
}

impl OpKind {
    /// Returns true for knits and tucks, the operations that may share a slot under all-needle
    /// racking.
    pub const fn is_loop_forming(&self) -> bool {
        matches!(self, Self::Knit | Self::Tuck)
    }

    pub const fn is_kick(&self) -> bool {
        matches!(self, Self::Kick)
    }
}

/// A single needle instruction: the shared payload of all needle-operating variants.
///
/// Transfers have no direction and no carriers; every other kind carries a direction, and user
/// operations usually carry a carrier set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeedleOp {
    pub kind: OpKind,
    pub needle: Needle,
    pub direction: Option<Direction>,
    pub carriers: Option<CarrierSet>,
}

impl NeedleOp {
    /// Returns a scheduler-generated kick of the specified carriers at a front-bed position.
    pub fn kick(position: i32, direction: Direction, carriers: CarrierSet) -> Self {
        Self {
            kind: OpKind::Kick,
            needle: Needle::front(position),
            direction: Some(direction),
            carriers: Some(carriers),
        }
    }

    /// Returns the front-bed slot this operation works under the specified racking offset.
    pub const fn slot(&self, rack: i32) -> i32 {
        self.needle.slot(rack)
    }
}

impl fmt::Display for NeedleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            OpKind::Knit => "knit",
            OpKind::Tuck => "tuck",
            // kicks are serialised as the misses they are
            OpKind::Miss | OpKind::Kick => "miss",
            OpKind::Split { .. } => "split",
            OpKind::Xfer { .. } => "xfer",
        };
        write!(f, "{name}")?;
        if let Some(direction) = self.direction {
            write!(f, " {direction}")?;
        }
        write!(f, " {}", self.needle)?;
        match self.kind {
            OpKind::Split { target } | OpKind::Xfer { target } => write!(f, " {target}")?,
            _ => (),
        }
        if let Some(carriers) = &self.carriers
            && !carriers.is_empty()
        {
            write!(f, " {carriers}")?;
        }
        Ok(())
    }
}

// INSTRUCTION
// ================================================================================================

/// One parsed knitout line in execution order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// A needle operation (knit, tuck, miss, kick, split, or transfer).
    Needle(NeedleOp),
    /// Change the racking state.
    Rack(RackState),
    /// Bring a carrier in on the yarn-inserting hook.
    Inhook(CarrierId),
    /// Release the hook once knitting has secured the yarn.
    Releasehook(CarrierId),
    /// Return a carrier to the grippers.
    Outhook(CarrierId),
    /// Stop the machine until the operator resumes it.
    Pause,
    /// A comment line, passed through untouched.
    Comment(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Needle(op) => write!(f, "{op}"),
            Self::Rack(rack) => write!(f, "rack {rack}"),
            Self::Inhook(carrier) => write!(f, "inhook {carrier}"),
            Self::Releasehook(carrier) => write!(f, "releasehook {carrier}"),
            Self::Outhook(carrier) => write!(f, "outhook {carrier}"),
            Self::Pause => write!(f, "pause"),
            Self::Comment(text) => write!(f, ";{text}"),
        }
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::{Instruction, NeedleOp, OpKind};
    use crate::{CarrierSet, Direction, Needle, RackState};

    #[test]
    fn display_matches_knitout_syntax() {
        let knit = NeedleOp {
            kind: OpKind::Knit,
            needle: Needle::front(5),
            direction: Some(Direction::Rightward),
            carriers: CarrierSet::new([1]),
        };
        assert_eq!(format!("{knit}"), "knit + f5 1");

        let split = NeedleOp {
            kind: OpKind::Split { target: Needle::back(5) },
            needle: Needle::front(5),
            direction: Some(Direction::Leftward),
            carriers: CarrierSet::new([2, 3]),
        };
        assert_eq!(format!("{split}"), "split - f5 b5 2 3");

        let xfer = NeedleOp {
            kind: OpKind::Xfer { target: Needle::front(4) },
            needle: Needle::back(4),
            direction: None,
            carriers: None,
        };
        assert_eq!(format!("{xfer}"), "xfer b4 f4");

        let kick = NeedleOp::kick(12, Direction::Leftward, CarrierSet::single(1));
        assert_eq!(format!("{kick}"), "miss - f12 1");

        assert_eq!(format!("{}", Instruction::Rack(RackState::new(-1, true))), "rack -0.75");
        assert_eq!(format!("{}", Instruction::Inhook(4)), "inhook 4");
    }
}
