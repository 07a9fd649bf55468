use alloc::{collections::BTreeMap, vec::Vec};
use core::iter::repeat_n;

use knitout_core::{CarriagePass, MachineSpec};

use crate::{
    RasterError,
    codes::{
        AmissSplitHookColor, DirectionColor, HookOperationColor, KnitCancelColor, LeftLine,
        LinksProcessColor, OPTION_LINE_COUNT, PauseColor, PresserMode, RackDirectionColor,
        RightLine, STOPPING_MARK, carriers_to_int, operation_color,
    },
};

// RASTER PARAMETERS
// ================================================================================================

/// Pixel-layout parameters of the raster grid.
#[derive(Clone, Copy, Debug)]
pub struct RasterParams {
    /// Zero rows under and over the pattern.
    pub vertical_buffer: usize,
    /// Zero pixels outside each option block.
    pub option_space: usize,
    /// Zero pixels between each option block and the pattern band.
    pub pattern_space: usize,
}

impl Default for RasterParams {
    fn default() -> Self {
        Self { vertical_buffer: 5, option_space: 10, pattern_space: 4 }
    }
}

impl RasterParams {
    /// Pixels from the row edge to the inside of an option block.
    pub const fn option_margin_width(&self) -> usize {
        self.option_space + 2 * OPTION_LINE_COUNT
    }
}

// RASTER PASS
// ================================================================================================

/// A carriage pass plus every pixel-level decision needed to draw its raster row.
#[derive(Clone, Debug)]
pub struct RasterPass {
    pass: CarriagePass,
    slot_colors: BTreeMap<i32, u8>,
    hook_operation: HookOperationColor,
    knit_cancel: KnitCancelColor,
    stitch_number: u8,
    speed_number: u8,
    presser: PresserMode,
    pause: bool,
    drop_sinker: bool,
}

impl RasterPass {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Wraps a carriage pass, resolving each of its operations to a pattern-band color.
    ///
    /// Transfer passes force knit-cancel on and a zero stitch number. Two operations may share a
    /// slot only as an opposite-bed knit/tuck combination under all-needle racking.
    pub fn new(pass: CarriagePass, spec: &MachineSpec) -> Result<Self, RasterError> {
        let rack = pass.rack();
        if rack.rack.abs() > spec.max_rack {
            return Err(RasterError::RackExceedsMachine { rack: rack.rack, max_rack: spec.max_rack });
        }

        let mut slot_colors: BTreeMap<i32, u8> = BTreeMap::new();
        for op in pass.ops() {
            let slot = op.slot(rack.rack);
            let color = operation_color(op);
            let code = match slot_colors.get(&slot) {
                None => color.code(),
                Some(&existing) => {
                    let combined = crate::codes::OperationColor::from_code(existing)
                        .filter(|_| rack.all_needle)
                        .and_then(|existing| existing.all_needle_with(color));
                    match combined {
                        Some(combined) => combined.code(),
                        None => {
                            return Err(RasterError::InvalidAllNeedle {
                                slot,
                                first: existing,
                                second: color.code(),
                            });
                        },
                    }
                },
            };
            slot_colors.insert(slot, code);
        }

        let is_xfer = pass.is_xfer_pass();
        Ok(Self {
            pass,
            slot_colors,
            hook_operation: HookOperationColor::None,
            knit_cancel: if is_xfer { KnitCancelColor::KnitCancel } else { KnitCancelColor::Standard },
            stitch_number: if is_xfer { 0 } else { 5 },
            speed_number: 0,
            presser: PresserMode::default(),
            pause: false,
            drop_sinker: false,
        })
    }

    pub fn with_stitch_number(mut self, stitch_number: u8) -> Self {
        if !self.pass.is_xfer_pass() {
            self.stitch_number = stitch_number;
        }
        self
    }

    pub fn with_drop_sinker(mut self) -> Self {
        self.drop_sinker = true;
        self
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    pub fn pass(&self) -> &CarriagePass {
        &self.pass
    }

    pub fn hook_operation(&self) -> HookOperationColor {
        self.hook_operation
    }

    pub fn direction_color(&self) -> DirectionColor {
        DirectionColor::of(self.pass.direction())
    }

    /// Returns true if the pass draws an operation on the specified slot.
    pub fn covers_slot(&self, slot: i32) -> bool {
        self.slot_colors.contains_key(&slot)
    }

    // STATE MUTATORS
    // --------------------------------------------------------------------------------------------

    /// Sets the yarn-inserting-hook operation for this row.
    ///
    /// An inhook can only take effect on a leftward pass; the hook feeds yarn from the right.
    pub fn set_hook_operation(&mut self, hook: HookOperationColor) -> Result<(), RasterError> {
        if hook == HookOperationColor::InHook
            && self.pass.direction() != Some(knitout_core::Direction::Leftward)
        {
            return Err(RasterError::InhookOnRightwardPass);
        }
        self.hook_operation = hook;
        Ok(())
    }

    pub fn set_knit_cancel(&mut self, knit_cancel: KnitCancelColor) {
        self.knit_cancel = knit_cancel;
    }

    pub fn set_pause(&mut self, pause: bool) {
        self.pause = pause;
    }

    /// Shifts every slot color rightward by the specified amount.
    pub fn shift_slot_colors(&mut self, shift: i32) {
        if shift != 0 {
            self.slot_colors =
                self.slot_colors.iter().map(|(&slot, &code)| (slot + shift, code)).collect();
        }
    }

    // ROW RENDERING
    // --------------------------------------------------------------------------------------------

    /// The pixel width of a raster row for the specified pattern width.
    pub fn raster_width(pattern_width: i32, params: &RasterParams) -> usize {
        2 * params.option_margin_width()
            + 2 * params.pattern_space
            + pattern_width.max(0) as usize
            + 2
    }

    /// Renders this pass as one raster row.
    ///
    /// `offset_slots` shifts the drawn pattern; it is -1 for programs that never touch slot 0, so
    /// the encoded pattern always starts at the band's origin.
    pub fn raster_row(
        &self,
        pattern_width: i32,
        params: &RasterParams,
        offset_slots: i32,
    ) -> Vec<u8> {
        let mut row = Vec::with_capacity(Self::raster_width(pattern_width, params));
        row.extend(repeat_n(0u8, params.option_space));
        // the left block mirrors the right one: line 1 sits nearest the pattern
        let left = self.left_option_block();
        row.extend(left.iter().rev());
        row.extend(repeat_n(0u8, params.pattern_space));

        let (left_stop, right_stop) = self.stop_marks();
        let (left_stop, right_stop) = (left_stop + offset_slots, right_stop + offset_slots);
        for slot_index in -1..=pattern_width {
            if slot_index == left_stop || slot_index == right_stop {
                row.push(STOPPING_MARK);
            } else if let Some(&code) = self.slot_colors.get(&(slot_index - offset_slots)) {
                row.push(code);
            } else {
                row.push(0);
            }
        }

        row.extend(repeat_n(0u8, params.pattern_space));
        let right = self.right_option_block();
        row.extend(right.iter());
        row.extend(repeat_n(0u8, params.option_space));
        debug_assert_eq!(row.len(), Self::raster_width(pattern_width, params));
        row
    }

    /// The stopping-mark slots framing this pass's operations.
    fn stop_marks(&self) -> (i32, i32) {
        match (self.slot_colors.first_key_value(), self.slot_colors.last_key_value()) {
            (Some((&min, _)), Some((&max, _))) => (min - 1, max + 1),
            _ => (0, 0),
        }
    }

    // OPTION BLOCKS
    // --------------------------------------------------------------------------------------------

    /// An option block before any settings: line numbers on even pixels, zero values between.
    fn blank_block() -> [u8; 2 * OPTION_LINE_COUNT] {
        let mut block = [0u8; 2 * OPTION_LINE_COUNT];
        for number in 1..=OPTION_LINE_COUNT {
            block[(number - 1) * 2] = number as u8;
        }
        block
    }

    /// Writes a line's value pixel. The direction line (1) carries its value on the line pixel
    /// itself instead of beside it.
    fn set_line(block: &mut [u8; 2 * OPTION_LINE_COUNT], number: usize, value: u8) {
        let position = (number - 1) * 2;
        if number == 1 {
            block[position] = value;
        } else {
            block[position + 1] = value;
        }
    }

    fn left_option_block(&self) -> [u8; 2 * OPTION_LINE_COUNT] {
        let mut block = Self::blank_block();
        let rack = self.pass.rack();

        Self::set_line(&mut block, LeftLine::Direction.number(), self.direction_color().code());
        let (rack_direction, pitch) = if rack.rack >= 1 {
            (RackDirectionColor::Right, rack.rack - 1)
        } else {
            (RackDirectionColor::Left, rack.rack.abs())
        };
        Self::set_line(&mut block, LeftLine::RackPitch.number(), pitch as u8);
        Self::set_line(&mut block, LeftLine::RackAlignment.number(), rack.all_needle as u8);
        Self::set_line(&mut block, LeftLine::RackDirection.number(), rack_direction as u8);
        let speed = if self.speed_number == 0 { 0 } else { self.speed_number + 10 };
        Self::set_line(&mut block, LeftLine::KnitSpeed.number(), speed);
        Self::set_line(&mut block, LeftLine::TransferSpeed.number(), speed);
        if self.pause {
            Self::set_line(&mut block, LeftLine::Pause.number(), PauseColor::Pause as u8);
        }
        if self.pass.contains_split() {
            Self::set_line(
                &mut block,
                LeftLine::AmissSplitFlag.number(),
                AmissSplitHookColor::SplitHook as u8,
            );
        }
        block
    }

    fn right_option_block(&self) -> [u8; 2 * OPTION_LINE_COUNT] {
        let mut block = Self::blank_block();

        Self::set_line(&mut block, RightLine::Direction.number(), self.direction_color().code());
        if self.pass.is_xfer_pass() {
            Self::set_line(&mut block, RightLine::CarrierNumber.number(), 0);
        } else {
            let carrier_int = carriers_to_int(self.pass.carriers());
            Self::set_line(&mut block, RightLine::CarrierNumber.number(), carrier_int);
            Self::set_line(&mut block, RightLine::HookOperation.number(), self.hook_operation.code());
            let gripper = match self.hook_operation {
                HookOperationColor::InHook => carrier_int,
                // outhook gripper values ride above 100
                HookOperationColor::OutHook => 100 + carrier_int,
                _ => 0,
            };
            Self::set_line(&mut block, RightLine::CarrierGripper.number(), gripper);
        }
        Self::set_line(&mut block, RightLine::KnitCancel.number(), self.knit_cancel.code());
        Self::set_line(&mut block, RightLine::StitchNumber.number(), self.stitch_number);
        if self.drop_sinker {
            Self::set_line(
                &mut block,
                RightLine::DropSinker.number(),
                crate::codes::DropSinkerColor::DropSinker as u8,
            );
        }
        Self::set_line(&mut block, RightLine::LinksProcess.number(), LinksProcessColor::Ignore as u8);
        Self::set_line(&mut block, RightLine::PresserMode.number(), self.presser.option_value(&self.pass));
        block
    }
}

// TESTS
// ================================================================================================
