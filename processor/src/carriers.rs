use alloc::collections::BTreeMap;

use knitout_core::{CarriagePass, CarrierId, CarrierSet, Direction, Instruction};

// CONSTANTS
// ================================================================================================

/// How far a kicked carrier may drift from the needle it was kicked to.
///
/// A kick releases the carrier while the carriage is still moving; the carrier comes to rest
/// somewhere within this distance of the kick needle, on the side the carriage came from.
pub const STOPPING_DISTANCE: i32 = 10;

// CARRIER STATE
// ================================================================================================

/// Where a single yarn carrier is, as far as the scheduler can know.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarrierState {
    /// Parked in the grippers, off the bed.
    Inactive,
    /// At a precisely known slot (the last needle it worked).
    At(i32),
    /// Kicked toward `anchor`; its true position is within the stopping distance of the anchor,
    /// on the side opposite the kick direction.
    Kicked { anchor: i32, direction: Direction },
}

impl CarrierState {
    /// Returns the anchor slot for an on-bed carrier.
    pub const fn anchor(&self) -> Option<i32> {
        match self {
            Self::Inactive => None,
            Self::At(slot) => Some(*slot),
            Self::Kicked { anchor, .. } => Some(*anchor),
        }
    }

    /// Returns the interval of slots the carrier may occupy.
    pub const fn position_range(&self) -> Option<(i32, i32)> {
        match self {
            Self::Inactive => None,
            Self::At(slot) => Some((*slot, *slot)),
            Self::Kicked { anchor, direction: Direction::Leftward } => {
                Some((*anchor - STOPPING_DISTANCE, *anchor))
            },
            Self::Kicked { anchor, direction: Direction::Rightward } => {
                Some((*anchor, *anchor + STOPPING_DISTANCE))
            },
        }
    }
}

// CARRIER TRACKER
// ================================================================================================

/// The carrier-position model the scheduler executes the grouped stream against.
///
/// Mutated in place as the stream advances; it never escapes its owning pipeline step. Alongside
/// carrier positions it tracks which carrier sits on the yarn-inserting hook, the direction that
/// hook was fed in, and the carriage's last direction of travel.
#[derive(Clone, Debug)]
pub struct CarrierTracker {
    states: BTreeMap<CarrierId, CarrierState>,
    hook_carrier: Option<CarrierId>,
    hook_direction: Option<Direction>,
    last_direction: Option<Direction>,
}

impl CarrierTracker {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a tracker with every carrier parked in the grippers.
    pub fn new(carrier_count: u8) -> Self {
        Self {
            states: (1..=carrier_count).map(|id| (id, CarrierState::Inactive)).collect(),
            hook_carrier: None,
            hook_direction: None,
            last_direction: None,
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    pub fn state(&self, carrier: CarrierId) -> CarrierState {
        self.states.get(&carrier).copied().unwrap_or(CarrierState::Inactive)
    }

    /// Returns the interval of slots the specified carrier may occupy, or `None` if it is off the
    /// bed.
    pub fn position_range(&self, carrier: CarrierId) -> Option<(i32, i32)> {
        self.state(carrier).position_range()
    }

    /// Iterates the on-bed carriers with their anchor slots.
    pub fn active_carriers(&self) -> impl Iterator<Item = (CarrierId, i32)> + '_ {
        self.states.iter().filter_map(|(&id, state)| state.anchor().map(|slot| (id, slot)))
    }

    /// The direction the carrier currently on the hook was fed in, once it has knit.
    pub fn hook_input_direction(&self) -> Option<Direction> {
        self.hook_direction
    }

    pub fn carrier_on_hook(&self) -> Option<CarrierId> {
        self.hook_carrier
    }

    /// The direction of the carriage's most recent directed movement.
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    // STATE MUTATORS
    // --------------------------------------------------------------------------------------------

    /// Executes a free-standing instruction on the model.
    ///
    /// Hook operations pin the affected carrier's position: after an inhook or outhook the
    /// carrier is no longer considered kicked. A releasehook leaves positions untouched.
    pub fn execute_instruction(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Inhook(carrier) => {
                self.states.insert(*carrier, CarrierState::Inactive);
                self.hook_carrier = Some(*carrier);
                self.hook_direction = None;
            },
            Instruction::Releasehook(carrier) => {
                if self.hook_carrier == Some(*carrier) {
                    self.hook_carrier = None;
                    self.hook_direction = None;
                }
            },
            Instruction::Outhook(carrier) => {
                self.states.insert(*carrier, CarrierState::Inactive);
                if self.hook_carrier == Some(*carrier) {
                    self.hook_carrier = None;
                    self.hook_direction = None;
                }
            },
            _ => (),
        }
    }

    /// Executes a carriage pass: every carrier it used comes to rest, precisely known, at the
    /// pass's final slot.
    pub fn execute_pass(&mut self, pass: &CarriagePass) {
        let Some(direction) = pass.direction() else {
            return;
        };
        self.last_direction = Some(direction);
        let (Some(carriers), Some((leftmost, rightmost))) = (pass.carriers(), pass.slot_range())
        else {
            return;
        };
        let end = direction.end_slot(leftmost, rightmost);
        for carrier in carriers.iter() {
            self.states.insert(carrier, CarrierState::At(end));
            if self.hook_carrier == Some(carrier) && self.hook_direction.is_none() {
                self.hook_direction = Some(direction);
            }
        }
    }

    /// Executes a kick: the carriers are re-anchored at the kick position with kick-direction
    /// uncertainty.
    pub fn execute_kick(&mut self, position: i32, direction: Direction, carriers: &CarrierSet) {
        self.last_direction = Some(direction);
        for carrier in carriers.iter() {
            self.states.insert(carrier, CarrierState::Kicked { anchor: position, direction });
        }
    }
}

// TESTS
// ================================================================================================
