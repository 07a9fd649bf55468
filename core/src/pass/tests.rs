use super::{CarriagePass, PassKind};
use crate::{CarrierSet, Direction, Needle, NeedleOp, OpKind, RackState};

fn op(kind: OpKind, needle: Needle, direction: Option<Direction>, carrier: Option<u8>) -> NeedleOp {
    NeedleOp {
        kind,
        needle,
        direction,
        carriers: carrier.map(CarrierSet::single),
    }
}

fn knit(needle: Needle, direction: Direction, carrier: u8) -> NeedleOp {
    op(OpKind::Knit, needle, Some(direction), Some(carrier))
}

fn tuck(needle: Needle, direction: Direction, carrier: u8) -> NeedleOp {
    op(OpKind::Tuck, needle, Some(direction), Some(carrier))
}

fn xfer(from: Needle) -> NeedleOp {
    op(OpKind::Xfer { target: from.opposite() }, from, None, None)
}

const FLAT: RackState = RackState::new(0, false);
const ALL_NEEDLE: RackState = RackState::new(0, true);

#[test]
fn knits_and_tucks_mix_in_direction_order() {
    let mut pass = CarriagePass::new(knit(Needle::front(0), Direction::Rightward, 1), FLAT);
    assert_eq!(pass.kind(), PassKind::KnitTuck);

    let next = tuck(Needle::front(1), Direction::Rightward, 1);
    assert!(pass.can_append(&next, FLAT));
    pass.push(next);

    // moving backwards starts a new pass
    assert!(!pass.can_append(&knit(Needle::front(1), Direction::Rightward, 1), FLAT));
    assert!(!pass.can_append(&knit(Needle::front(0), Direction::Rightward, 1), FLAT));
    assert_eq!(pass.slot_range(), Some((0, 1)));
}

#[test]
fn direction_carriers_and_rack_must_match() {
    let pass = CarriagePass::new(knit(Needle::front(3), Direction::Rightward, 1), FLAT);
    assert!(!pass.can_append(&knit(Needle::front(4), Direction::Leftward, 1), FLAT));
    assert!(!pass.can_append(&knit(Needle::front(4), Direction::Rightward, 2), FLAT));
    assert!(!pass.can_append(&knit(Needle::front(4), Direction::Rightward, 1), RackState::new(1, false)));
}

#[test]
fn back_bed_slots_follow_the_rack() {
    let rack = RackState::new(2, false);
    let mut pass = CarriagePass::new(knit(Needle::front(3), Direction::Rightward, 1), rack);
    // b2 sits on slot 4 under rack 2
    let next = knit(Needle::back(2), Direction::Rightward, 1);
    assert!(pass.can_append(&next, rack));
    pass.push(next);
    assert_eq!(pass.slot_range(), Some((3, 4)));
}

#[test]
fn same_slot_needs_all_needle_alignment() {
    let mut pass = CarriagePass::new(knit(Needle::front(5), Direction::Leftward, 1), ALL_NEEDLE);
    let back = knit(Needle::back(5), Direction::Leftward, 1);
    assert!(pass.can_append(&back, ALL_NEEDLE));
    pass.push(back);

    // a third operation on the same slot is never accepted
    assert!(!pass.can_append(&tuck(Needle::front(5), Direction::Leftward, 1), ALL_NEEDLE));

    // without all-needle alignment the same pair is rejected
    let flat_pass = CarriagePass::new(knit(Needle::front(5), Direction::Leftward, 1), FLAT);
    assert!(!flat_pass.can_append(&knit(Needle::back(5), Direction::Leftward, 1), FLAT));
}

#[test]
fn same_slot_same_bed_is_rejected_even_all_needle() {
    let pass = CarriagePass::new(knit(Needle::front(5), Direction::Leftward, 1), ALL_NEEDLE);
    assert!(!pass.can_append(&tuck(Needle::front(5), Direction::Leftward, 1), ALL_NEEDLE));
}

#[test]
fn misses_do_not_all_needle() {
    let pass = CarriagePass::new(
        op(OpKind::Miss, Needle::front(5), Some(Direction::Leftward), Some(1)),
        ALL_NEEDLE,
    );
    assert_eq!(pass.kind(), PassKind::Miss);
    let back = op(OpKind::Miss, Needle::back(5), Some(Direction::Leftward), Some(1));
    assert!(!pass.can_append(&back, ALL_NEEDLE));
}

#[test]
fn transfer_passes_have_no_direction_and_reject_repeats() {
    let mut pass = CarriagePass::new(xfer(Needle::front(2)), FLAT);
    assert_eq!(pass.kind(), PassKind::Transfer);
    assert_eq!(pass.direction(), None);

    // transfers may arrive in any slot order
    let earlier = xfer(Needle::front(0));
    assert!(pass.can_append(&earlier, FLAT));
    pass.push(earlier);

    assert!(!pass.can_append(&xfer(Needle::front(2)), FLAT));
    // a knit cannot join a transfer pass
    assert!(!pass.can_append(&knit(Needle::front(4), Direction::Rightward, 1), FLAT));
}

#[test]
fn trailing_kick_extends_travel() {
    let mut pass = CarriagePass::new(knit(Needle::front(4), Direction::Rightward, 1), FLAT);
    pass.push_kick(NeedleOp::kick(9, Direction::Rightward, CarrierSet::single(1)));
    assert_eq!(pass.slot_range(), Some((4, 9)));
    assert_eq!(pass.knitting_slot_range(), Some((4, 4)));
    assert!(pass.contains_kick());
}
