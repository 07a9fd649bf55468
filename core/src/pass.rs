use alloc::vec::Vec;

use crate::{CarrierSet, Direction, NeedleOp, OpKind, RackState};

// PASS KIND
// ================================================================================================

/// The operation class of a carriage pass.
///
/// Knits and tucks mix freely within one pass; transfers, splits, and misses each keep to their
/// own passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassKind {
    KnitTuck,
    Transfer,
    Split,
    Miss,
}

impl PassKind {
    /// Returns the pass class the specified operation belongs to.
    pub const fn of(kind: &OpKind) -> Self {
        match kind {
            OpKind::Knit | OpKind::Tuck => Self::KnitTuck,
            OpKind::Miss | OpKind::Kick => Self::Miss,
            OpKind::Split { .. } => Self::Split,
            OpKind::Xfer { .. } => Self::Transfer,
        }
    }
}

// CARRIAGE PASS
// ================================================================================================

/// An ordered group of needle operations executed in one carriage traversal.
///
/// All operations in a pass share one rack state, one direction (none for transfer passes), one
/// carrier set, and one [PassKind]. Operations are stored in the order the carriage visits them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarriagePass {
    rack: RackState,
    direction: Option<Direction>,
    carriers: Option<CarrierSet>,
    kind: PassKind,
    ops: Vec<NeedleOp>,
}

impl CarriagePass {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Starts a new pass from its first operation.
    pub fn new(op: NeedleOp, rack: RackState) -> Self {
        Self {
            rack,
            direction: op.direction,
            carriers: op.carriers.clone(),
            kind: PassKind::of(&op.kind),
            ops: vec![op],
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    pub fn rack(&self) -> RackState {
        self.rack
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn carriers(&self) -> Option<&CarrierSet> {
        self.carriers.as_ref()
    }

    pub fn kind(&self) -> PassKind {
        self.kind
    }

    pub fn is_xfer_pass(&self) -> bool {
        self.kind == PassKind::Transfer
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations in carriage visit order.
    pub fn ops(&self) -> &[NeedleOp] {
        &self.ops
    }

    /// Returns the leftmost and rightmost slots this pass works.
    pub fn slot_range(&self) -> Option<(i32, i32)> {
        self.slot_range_of(|_| true)
    }

    /// Returns the slot range of the user operations in this pass, ignoring scheduler kicks.
    pub fn knitting_slot_range(&self) -> Option<(i32, i32)> {
        self.slot_range_of(|op| !op.kind.is_kick())
    }

    fn slot_range_of(&self, keep: impl Fn(&NeedleOp) -> bool) -> Option<(i32, i32)> {
        let mut slots = self.ops.iter().filter(|op| keep(op)).map(|op| op.slot(self.rack.rack));
        let first = slots.next()?;
        let (mut leftmost, mut rightmost) = (first, first);
        for slot in slots {
            leftmost = leftmost.min(slot);
            rightmost = rightmost.max(slot);
        }
        Some((leftmost, rightmost))
    }

    /// Returns the slot of the last operation added to the pass.
    pub fn last_slot(&self) -> Option<i32> {
        self.ops.last().map(|op| op.slot(self.rack.rack))
    }

    /// Returns true if any operation's primary needle is on the front bed.
    pub fn has_front_needles(&self) -> bool {
        self.ops.iter().any(|op| op.needle.bed.is_front())
    }

    /// Returns true if any operation's primary needle is on the back bed.
    pub fn has_back_needles(&self) -> bool {
        self.ops.iter().any(|op| !op.needle.bed.is_front())
    }

    pub fn contains_split(&self) -> bool {
        self.ops.iter().any(|op| matches!(op.kind, OpKind::Split { .. }))
    }

    pub fn contains_kick(&self) -> bool {
        self.ops.iter().any(|op| op.kind.is_kick())
    }

    // PASS CONSTRUCTION
    // --------------------------------------------------------------------------------------------

    /// Returns true if the specified operation can extend this pass.
    ///
    /// The operation must match the pass's rack state, direction, carrier set, and operation
    /// class, and its needle must lie strictly beyond the last visited slot in the pass
    /// direction. The one exception is an opposite-bed operation on the last slot, accepted when
    /// the rack is at all-needle alignment and both operations form loops. Transfer passes have no
    /// direction; they accept any transfer that does not repeat a needle already in the pass.
    pub fn can_append(&self, op: &NeedleOp, rack: RackState) -> bool {
        if rack != self.rack
            || PassKind::of(&op.kind) != self.kind
            || op.direction != self.direction
            || op.carriers != self.carriers
        {
            return false;
        }
        match self.direction {
            None => self.ops.iter().all(|existing| existing.needle != op.needle),
            Some(direction) => {
                let last = self.ops.last().expect("a pass always holds at least one operation");
                let last_slot = last.slot(self.rack.rack);
                let slot = op.slot(self.rack.rack);
                if direction.is_beyond(slot, last_slot) {
                    return true;
                }
                slot == last_slot
                    && self.rack.all_needle
                    && op.needle.bed != last.needle.bed
                    && op.kind.is_loop_forming()
                    && last.kind.is_loop_forming()
            },
        }
    }

    /// Appends an operation previously accepted by [Self::can_append].
    pub fn push(&mut self, op: NeedleOp) {
        debug_assert!(self.can_append(&op, self.rack));
        self.ops.push(op);
    }

    /// Appends a scheduler kick to a directed pass, extending its travel.
    ///
    /// Kicks bypass the operation-class check: a knit/tuck pass may carry a trailing kick. The
    /// caller guarantees the kick continues the pass direction beyond its last slot.
    pub fn push_kick(&mut self, op: NeedleOp) {
        debug_assert!(op.kind.is_kick());
        debug_assert!(self.direction.is_some());
        self.ops.push(op);
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests;
