use alloc::{
    collections::{BTreeMap, BTreeSet},
    vec::Vec,
};

use itertools::{Itertools, MinMaxResult};
use knitout_core::{
    CarriagePass, CarrierId, CarrierSet, Direction, MachineSpec, NeedleOp, PassKind, RackState,
};

use crate::{CarrierTracker, STOPPING_DISTANCE, ScheduleElement, ScheduleError};

// SCHEDULE
// ================================================================================================

/// The kick-scheduled execution stream, plus the slot extent of the user's knitting.
///
/// The slot extent ranges over user operations only; kick movements beyond the pattern do not
/// widen it.
#[derive(Clone, Debug)]
pub struct Schedule {
    pub elements: Vec<ScheduleElement>,
    pub leftmost_slot: i32,
    pub rightmost_slot: i32,
}

impl Schedule {
    /// The width of the needle range used by the knitting operations.
    pub fn knitting_width(&self) -> i32 {
        if self.rightmost_slot >= self.leftmost_slot {
            self.rightmost_slot - self.leftmost_slot + 1
        } else {
            0
        }
    }
}

// KICKBACK SCHEDULER
// ================================================================================================

/// Rewrites a grouped stream so that no idle carrier sits in the path of any carriage pass,
/// by inserting kick (soft-miss) passes ahead of each conflicted pass.
pub fn schedule_kickbacks(
    elements: Vec<ScheduleElement>,
    spec: &MachineSpec,
) -> Result<Schedule, ScheduleError> {
    let mut scheduler = KickbackScheduler::new(spec);
    for element in elements {
        scheduler.process(element)?;
    }
    Ok(scheduler.finish())
}

/// A planned kick: not yet executed on the carrier model, not yet emitted.
#[derive(Clone, Debug)]
struct KickPlan {
    position: i32,
    direction: Direction,
    carriers: CarrierSet,
}

impl KickPlan {
    /// The span of slots the kicked carriers may end up occupying.
    fn span(&self) -> (i32, i32) {
        match self.direction {
            Direction::Leftward => (self.position - STOPPING_DISTANCE, self.position),
            Direction::Rightward => (self.position, self.position + STOPPING_DISTANCE),
        }
    }
}

struct KickbackScheduler {
    tracker: CarrierTracker,
    bed_width: i32,
    out: Vec<ScheduleElement>,
    // whether out ends with a pass a kick may still be merged into
    merge_candidate: bool,
}

impl KickbackScheduler {
    fn new(spec: &MachineSpec) -> Self {
        Self {
            tracker: CarrierTracker::new(spec.carrier_count),
            bed_width: spec.needle_count,
            out: Vec::new(),
            merge_candidate: false,
        }
    }

    fn process(&mut self, element: ScheduleElement) -> Result<(), ScheduleError> {
        match element {
            ScheduleElement::Instruction(instruction) => {
                self.tracker.execute_instruction(&instruction);
                self.out.push(ScheduleElement::Instruction(instruction));
                self.merge_candidate = false;
                Ok(())
            },
            ScheduleElement::Pass(pass) => self.process_pass(pass),
        }
    }

    fn process_pass(&mut self, pass: CarriagePass) -> Result<(), ScheduleError> {
        let has_carriers = pass.carriers().is_some_and(|carriers| !carriers.is_empty());
        if !has_carriers {
            // transfer and carrier-less passes move no yarn and cannot conflict; transfers also
            // invalidate any pending kick merge
            self.tracker.execute_pass(&pass);
            self.merge_candidate = false;
            self.out.push(ScheduleElement::Pass(pass));
            return Ok(());
        }

        let mut kicks = self.plan_kicks(&pass)?;

        if kicks.first().is_some_and(|first| self.can_merge(first)) {
            let kick = kicks.remove(0);
            self.tracker.execute_kick(kick.position, kick.direction, &kick.carriers);
            let op = NeedleOp::kick(kick.position, kick.direction, kick.carriers);
            match self.out.last_mut() {
                Some(ScheduleElement::Pass(prev)) => prev.push_kick(op),
                _ => unreachable!("merge candidate is always a trailing pass"),
            }
        }

        for kick in kicks {
            self.tracker.execute_kick(kick.position, kick.direction, &kick.carriers);
            let op = NeedleOp::kick(kick.position, kick.direction, kick.carriers);
            self.out.push(ScheduleElement::Pass(CarriagePass::new(op, RackState::default())));
        }

        self.tracker.execute_pass(&pass);
        self.out.push(ScheduleElement::Pass(pass));
        self.merge_candidate = true;
        Ok(())
    }

    // KICK PLANNING
    // --------------------------------------------------------------------------------------------

    /// Plans the kicks that must run before the specified pass: alignment kicks that bring the
    /// pass's own carriers to the correct side of its starting slot, then conflict kicks that
    /// clear every other carrier out of the pass's working zone.
    fn plan_kicks(&self, pass: &CarriagePass) -> Result<Vec<KickPlan>, ScheduleError> {
        let carriers = pass.carriers().expect("checked by caller");
        let direction =
            pass.direction().expect("a pass that uses carriers always has a direction");
        let (pass_left, pass_right) =
            pass.slot_range().expect("a pass always holds at least one operation");

        // alignment kicks for the pass's own carriers
        let start = direction.start_slot(pass_left, pass_right);
        let mut plans: Vec<KickPlan> = Vec::new();
        for carrier in carriers.iter() {
            if let Some((lo, hi)) = self.tracker.position_range(carrier) {
                let wrong_side = match direction {
                    Direction::Rightward => lo > start,
                    Direction::Leftward => hi < start,
                };
                if wrong_side {
                    plans.push(KickPlan {
                        position: start,
                        direction: direction.opposite(),
                        carriers: CarrierSet::single(carrier),
                    });
                }
            }
        }

        // the working zone: the pass's travel (including carriage overrun on the stopping side),
        // the possible positions of its carriers, and the spans of the alignment kicks
        let (mut zone_left, mut zone_right) = (pass_left, pass_right);
        match direction {
            Direction::Leftward => zone_left -= STOPPING_DISTANCE,
            Direction::Rightward => zone_right += STOPPING_DISTANCE,
        }
        for carrier in carriers.iter() {
            if let Some((lo, hi)) = self.tracker.position_range(carrier) {
                zone_left = zone_left.min(lo);
                zone_right = zone_right.max(hi);
            }
        }
        for plan in &plans {
            let (lo, hi) = plan.span();
            zone_left = zone_left.min(lo);
            zone_right = zone_right.max(hi);
        }

        let exempt: BTreeSet<CarrierId> = carriers.iter().collect();
        plans.extend(self.kicks_out_of_zone(zone_left, zone_right, &exempt, true, true));

        for plan in &plans {
            if plan.position < 0 || plan.position > self.bed_width {
                return Err(ScheduleError::PatternTooWide {
                    position: plan.position,
                    carriers: plan.carriers.clone(),
                    bed_width: self.bed_width,
                    zone_left,
                    zone_right,
                });
            }
        }
        Ok(plans)
    }

    /// Plans kicks pushing every conflicting carrier out of `[left, right]`.
    ///
    /// Carriers at or left of the zone midpoint push left, the rest push right (when both
    /// directions are allowed). Each side lands its carriers outward of the zone edge in steps of
    /// the stopping distance, outermost carrier first, after recursively clearing the landing
    /// strip itself. Recursion terminates because every level exempts the carriers it already
    /// plans for.
    fn kicks_out_of_zone(
        &self,
        left: i32,
        right: i32,
        exempt: &BTreeSet<CarrierId>,
        allow_leftward: bool,
        allow_rightward: bool,
    ) -> Vec<KickPlan> {
        debug_assert!(allow_leftward || allow_rightward);

        // conflicting carriers grouped by anchor position, ascending
        let mut by_position: BTreeMap<i32, Vec<CarrierId>> = BTreeMap::new();
        for (id, anchor) in self.tracker.active_carriers() {
            if !exempt.contains(&id) && (left..=right).contains(&anchor) {
                by_position.entry(anchor).or_default().push(id);
            }
        }
        if by_position.is_empty() {
            return Vec::new();
        }
        let conflicts: Vec<(i32, Vec<CarrierId>)> = by_position.into_iter().collect();

        let mut inner_exempt = exempt.clone();
        inner_exempt.extend(conflicts.iter().flat_map(|(_, ids)| ids.iter().copied()));

        let (leftward, rightward): (Vec<_>, Vec<_>) = if allow_leftward && allow_rightward {
            let midpoint = left + (right - left) / 2;
            conflicts.into_iter().partition(|(anchor, _)| *anchor <= midpoint)
        } else if allow_leftward {
            (conflicts, Vec::new())
        } else {
            (Vec::new(), conflicts)
        };

        let mut kicks = Vec::new();

        if !leftward.is_empty() {
            let extension = 1 + leftward.len() as i32 * STOPPING_DISTANCE;
            kicks.extend(self.kicks_out_of_zone(left - extension, left, &inner_exempt, true, false));
            // ascending by position: the leftmost group lands deepest and moves first
            let groups = leftward.len();
            for (index, (_, ids)) in leftward.into_iter().enumerate() {
                let depth = (groups - 1 - index) as i32;
                kicks.push(KickPlan {
                    position: left - 1 - depth * STOPPING_DISTANCE,
                    direction: Direction::Leftward,
                    carriers: CarrierSet::new(ids).expect("conflict carriers are valid and distinct"),
                });
            }
        }

        if !rightward.is_empty() {
            let extension = 1 + rightward.len() as i32 * STOPPING_DISTANCE;
            kicks.extend(self.kicks_out_of_zone(right, right + extension, &inner_exempt, false, true));
            // descending by position: the rightmost group lands deepest and moves first
            let groups = rightward.len();
            for (index, (_, ids)) in rightward.into_iter().rev().enumerate() {
                let depth = (groups - 1 - index) as i32;
                kicks.push(KickPlan {
                    position: right + 1 + depth * STOPPING_DISTANCE,
                    direction: Direction::Rightward,
                    carriers: CarrierSet::new(ids).expect("conflict carriers are valid and distinct"),
                });
            }
        }

        kicks
    }

    // KICK MERGING
    // --------------------------------------------------------------------------------------------

    /// Returns true if the specified kick may extend the previously emitted pass instead of
    /// standing alone: same carrier set, a direction that continues the pass beyond its last
    /// slot, and a landing span free of every other carrier.
    fn can_merge(&self, kick: &KickPlan) -> bool {
        if !self.merge_candidate {
            return false;
        }
        let Some(ScheduleElement::Pass(prev)) = self.out.last() else {
            return false;
        };
        if !matches!(prev.kind(), PassKind::KnitTuck | PassKind::Miss) {
            return false;
        }
        if prev.direction() != Some(kick.direction) || prev.carriers() != Some(&kick.carriers) {
            return false;
        }
        let Some(last_slot) = prev.last_slot() else {
            return false;
        };
        if !kick.direction.is_beyond(kick.position, last_slot) {
            return false;
        }
        let (lo, hi) = kick.span();
        self.tracker
            .active_carriers()
            .all(|(id, anchor)| kick.carriers.contains(id) || !(lo..=hi).contains(&anchor))
    }

    // FINALIZATION
    // --------------------------------------------------------------------------------------------

    /// Seals the schedule, ranging over the user's needle operations (kicks excluded).
    fn finish(self) -> Schedule {
        let extent = self
            .out
            .iter()
            .filter_map(|element| match element {
                ScheduleElement::Pass(pass) => pass.knitting_slot_range(),
                ScheduleElement::Instruction(_) => None,
            })
            .flat_map(|(left, right)| [left, right])
            .minmax();
        let (leftmost_slot, rightmost_slot) = match extent {
            MinMaxResult::NoElements => (0, -1),
            MinMaxResult::OneElement(slot) => (slot, slot),
            MinMaxResult::MinMax(left, right) => (left, right),
        };
        Schedule { elements: self.out, leftmost_slot, rightmost_slot }
    }
}

// TESTS
// ================================================================================================
