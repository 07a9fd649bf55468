use alloc::vec::Vec;

use knitout_core::{CarriagePass, Instruction, RackState};

// SCHEDULE ELEMENT
// ================================================================================================

/// One element of the grouped execution stream: either a carriage pass or a free-standing
/// instruction (rack, hook operation, pause, comment).
#[derive(Clone, Debug, PartialEq)]
pub enum ScheduleElement {
    Pass(CarriagePass),
    Instruction(Instruction),
}

// PASS GROUPER
// ================================================================================================

/// Folds a flat instruction stream into an interleaved sequence of free-standing instructions and
/// carriage passes.
///
/// Consecutive needle instructions join the open pass while they share its rack state, direction,
/// carrier set, and operation class and keep moving in the pass direction; anything else starts a
/// new pass. Any non-needle instruction except a comment closes the open pass. A rack instruction
/// that restates the current rack state is elided.
pub fn group_instructions(instructions: &[Instruction]) -> Vec<ScheduleElement> {
    let mut elements = Vec::new();
    let mut open_pass: Option<CarriagePass> = None;
    let mut rack = RackState::default();

    for instruction in instructions {
        match instruction {
            Instruction::Needle(op) => {
                match open_pass.take() {
                    Some(mut pass) if pass.can_append(op, rack) => {
                        pass.push(op.clone());
                        open_pass = Some(pass);
                    },
                    Some(pass) => {
                        elements.push(ScheduleElement::Pass(pass));
                        open_pass = Some(CarriagePass::new(op.clone(), rack));
                    },
                    None => open_pass = Some(CarriagePass::new(op.clone(), rack)),
                }
            },
            Instruction::Rack(state) => {
                if *state != rack {
                    if let Some(pass) = open_pass.take() {
                        elements.push(ScheduleElement::Pass(pass));
                    }
                    rack = *state;
                    elements.push(ScheduleElement::Instruction(instruction.clone()));
                }
            },
            // comments carry no machine semantics and must not break the pass they annotate
            Instruction::Comment(_) => {
                elements.push(ScheduleElement::Instruction(instruction.clone()));
            },
            _ => {
                if let Some(pass) = open_pass.take() {
                    elements.push(ScheduleElement::Pass(pass));
                }
                elements.push(ScheduleElement::Instruction(instruction.clone()));
            },
        }
    }
    if let Some(pass) = open_pass {
        elements.push(ScheduleElement::Pass(pass));
    }
    elements
}

// TESTS
// ================================================================================================
