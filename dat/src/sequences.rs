use alloc::vec::Vec;

use knitout_core::{
    Bed, CarriagePass, Direction, MachineSpec, Needle, NeedleOp, OpKind, RackState,
};

use crate::{RasterError, RasterPass};

// STARTUP SEQUENCE
// ================================================================================================

/// The fixed prelude knitted before the pattern: a rightward miss pass over the full width, a
/// leftward knit pass on the front bed, and a rightward knit pass on the back bed.
///
/// No carriers are attached and the stitch number is forced to zero.
pub fn startup_rasters(
    pattern_width: i32,
    spec: &MachineSpec,
) -> Result<Vec<RasterPass>, RasterError> {
    if pattern_width < 1 {
        return Err(RasterError::EmptyPattern);
    }
    let passes = [
        bed_pass(OpKind::Miss, Bed::Front, Direction::Rightward, pattern_width),
        bed_pass(OpKind::Knit, Bed::Front, Direction::Leftward, pattern_width),
        bed_pass(OpKind::Knit, Bed::Back, Direction::Rightward, pattern_width),
    ];
    passes
        .into_iter()
        .map(|pass| Ok(RasterPass::new(pass, spec)?.with_stitch_number(0)))
        .collect()
}

// FINISH SEQUENCE
// ================================================================================================

/// The fixed postlude that binds the piece off the machine: a leftward front knit pass, a
/// rightward back knit pass, and a leftward all-needle knit pass that drops the piece (the final
/// row carries the drop-sinker flag).
///
/// The sequence depends only on the pattern width, so identical programs produce identical
/// closing rows.
pub fn finish_rasters(
    pattern_width: i32,
    spec: &MachineSpec,
) -> Result<Vec<RasterPass>, RasterError> {
    if pattern_width < 1 {
        return Err(RasterError::EmptyPattern);
    }
    let front = bed_pass(OpKind::Knit, Bed::Front, Direction::Leftward, pattern_width);
    let back = bed_pass(OpKind::Knit, Bed::Back, Direction::Rightward, pattern_width);
    let drop = all_needle_pass(pattern_width);
    Ok(vec![
        RasterPass::new(front, spec)?.with_stitch_number(0),
        RasterPass::new(back, spec)?.with_stitch_number(0),
        RasterPass::new(drop, spec)?.with_stitch_number(0).with_drop_sinker(),
    ])
}

// PASS CONSTRUCTION
// --------------------------------------------------------------------------------------------

fn sequence_op(kind: OpKind, bed: Bed, direction: Direction, position: i32) -> NeedleOp {
    NeedleOp {
        kind,
        needle: Needle { bed, position },
        direction: Some(direction),
        carriers: None,
    }
}

/// A single-bed pass covering positions `0..width` in the specified direction.
fn bed_pass(kind: OpKind, bed: Bed, direction: Direction, width: i32) -> CarriagePass {
    let rack = RackState::default();
    let positions: Vec<i32> = match direction {
        Direction::Rightward => (0..width).collect(),
        Direction::Leftward => (0..width).rev().collect(),
    };
    let mut positions = positions.into_iter();
    let first = positions.next().expect("width is at least one");
    let mut pass = CarriagePass::new(sequence_op(kind, bed, direction, first), rack);
    for position in positions {
        pass.push(sequence_op(kind, bed, direction, position));
    }
    pass
}

/// A leftward knit pass working both beds of every slot at all-needle alignment.
fn all_needle_pass(width: i32) -> CarriagePass {
    let rack = RackState::new(0, true);
    let mut ops = (0..width).rev().flat_map(|position| {
        [
            sequence_op(OpKind::Knit, Bed::Front, Direction::Leftward, position),
            sequence_op(OpKind::Knit, Bed::Back, Direction::Leftward, position),
        ]
    });
    let first = ops.next().expect("width is at least one");
    let mut pass = CarriagePass::new(first, rack);
    for op in ops {
        pass.push(op);
    }
    pass
}

// TESTS
// ================================================================================================
