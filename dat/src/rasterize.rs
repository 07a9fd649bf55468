use alloc::{collections::BTreeSet, vec::Vec};

use knitout_core::{
    CarriagePass, CarrierId, CarrierSet, Direction, Instruction, MachineSpec, Needle, NeedleOp,
    OpKind, RackState,
};
use knitout_processor::{CarrierTracker, Schedule, ScheduleElement};

use crate::{
    RasterError, RasterPass,
    codes::{DirectionColor, HookOperationColor, KnitCancelColor},
};

// RASTERIZATION
// ================================================================================================

/// Converts a kick-scheduled stream into the raster rows of the pattern section.
///
/// Walks the stream against a fresh carrier model so that releasehooks and outhooks can be
/// rendered as the soft-miss rows the machine expects, then applies the slot shift for patterns
/// left of slot zero and the carriage-move sweep for repeated directions.
pub fn rasterize_schedule(
    schedule: &Schedule,
    spec: &MachineSpec,
) -> Result<Vec<RasterPass>, RasterError> {
    let mut rasterizer = Rasterizer {
        spec,
        tracker: CarrierTracker::new(spec.carrier_count),
        pending_inhooks: BTreeSet::new(),
        pause_next: false,
        rasters: Vec::new(),
    };

    for element in &schedule.elements {
        match element {
            ScheduleElement::Instruction(instruction) => rasterizer.instruction(instruction)?,
            ScheduleElement::Pass(pass) => rasterizer.pass(pass)?,
        }
    }
    let Rasterizer { mut rasters, pause_next, .. } = rasterizer;
    // a trailing pause attaches to the final pass
    if pause_next && let Some(last) = rasters.last_mut() {
        last.set_pause(true);
    }

    if schedule.leftmost_slot < 0 {
        let shift = -schedule.leftmost_slot;
        for raster in &mut rasters {
            raster.shift_slot_colors(shift);
        }
    }

    carriage_move_sweep(&mut rasters);
    Ok(rasters)
}

/// Marks knit-cancel "carriage move" on every pass repeating the previous pass's direction; the
/// machine needs an explicit return move between same-direction passes. Transfer rows, which have
/// no direction, are skipped.
fn carriage_move_sweep(rasters: &mut [RasterPass]) {
    let mut last_color = DirectionColor::Unspecified;
    for raster in rasters.iter_mut() {
        let color = raster.direction_color();
        if color != DirectionColor::Unspecified {
            if color == last_color {
                raster.set_knit_cancel(KnitCancelColor::CarriageMove);
            }
            last_color = color;
        }
    }
}

// RASTERIZER
// ================================================================================================

struct Rasterizer<'a> {
    spec: &'a MachineSpec,
    tracker: CarrierTracker,
    pending_inhooks: BTreeSet<CarrierId>,
    pause_next: bool,
    rasters: Vec<RasterPass>,
}

impl Rasterizer<'_> {
    fn instruction(&mut self, instruction: &Instruction) -> Result<(), RasterError> {
        match instruction {
            Instruction::Inhook(carrier) => {
                self.pending_inhooks.insert(*carrier);
            },
            Instruction::Releasehook(carrier) => self.releasehook(*carrier)?,
            Instruction::Outhook(carrier) => self.outhook(*carrier)?,
            Instruction::Pause => self.pause_next = true,
            _ => (),
        }
        self.tracker.execute_instruction(instruction);
        Ok(())
    }

    fn pass(&mut self, pass: &CarriagePass) -> Result<(), RasterError> {
        let mut hook = HookOperationColor::None;
        if let Some(carriers) = pass.carriers() {
            for carrier in carriers.iter() {
                if self.pending_inhooks.remove(&carrier) {
                    hook = HookOperationColor::InHook;
                }
            }
        }
        let mut raster = RasterPass::new(pass.clone(), self.spec)?;
        raster.set_hook_operation(hook)?;
        if self.pause_next {
            raster.set_pause(true);
            self.pause_next = false;
        }
        self.rasters.push(raster);
        self.tracker.execute_pass(pass);
        Ok(())
    }

    /// A releasehook renders as a soft-miss row in the direction the hook was fed, preceded by an
    /// alignment soft-miss whenever the carriage last moved in that same direction.
    fn releasehook(&mut self, carrier: CarrierId) -> Result<(), RasterError> {
        let position = self
            .tracker
            .state(carrier)
            .anchor()
            .ok_or(RasterError::CarrierNotOnBed { carrier, operation: "releasehook" })?;
        let release_direction =
            self.tracker.hook_input_direction().ok_or(RasterError::HookNotActive { carrier })?;

        if self.tracker.last_direction() == Some(release_direction) {
            let kick = soft_miss(position, release_direction.opposite(), None);
            self.rasters.push(RasterPass::new(kick, self.spec)?);
        }
        let mut release =
            RasterPass::new(soft_miss(position, release_direction, None), self.spec)?;
        release.set_hook_operation(HookOperationColor::ReleaseHook)?;
        self.rasters.push(release);
        Ok(())
    }

    /// An outhook folds into the previous row when that row was a rightward pass carrying exactly
    /// this carrier; otherwise it renders as its own rightward soft-miss row, preceded by a
    /// leftward alignment soft-miss when the carriage last moved rightward.
    fn outhook(&mut self, carrier: CarrierId) -> Result<(), RasterError> {
        if let Some(last) = self.rasters.last_mut()
            && last.pass().direction() == Some(Direction::Rightward)
            && last.pass().carriers().is_some_and(|set| set.len() == 1 && set.first() == Some(carrier))
        {
            return last.set_hook_operation(HookOperationColor::OutHook);
        }

        let position = self
            .tracker
            .state(carrier)
            .anchor()
            .ok_or(RasterError::CarrierNotOnBed { carrier, operation: "outhook" })?;
        if self.tracker.last_direction() == Some(Direction::Rightward) {
            let kick = soft_miss(position, Direction::Leftward, Some(CarrierSet::single(carrier)));
            self.rasters.push(RasterPass::new(kick, self.spec)?);
        }
        let out = soft_miss(position, Direction::Rightward, Some(CarrierSet::single(carrier)));
        let mut out = RasterPass::new(out, self.spec)?;
        out.set_hook_operation(HookOperationColor::OutHook)?;
        self.rasters.push(out);
        Ok(())
    }
}

/// A one-kick carriage pass at rack zero, used for the synthesized hook-operation rows.
fn soft_miss(position: i32, direction: Direction, carriers: Option<CarrierSet>) -> CarriagePass {
    let op = NeedleOp {
        kind: OpKind::Kick,
        needle: Needle::front(position),
        direction: Some(direction),
        carriers,
    };
    CarriagePass::new(op, RackState::default())
}

// TESTS
// ================================================================================================
