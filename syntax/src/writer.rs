use alloc::string::String;
use core::fmt::Write;

use knitout_core::{Instruction, MachineSpec};

// KNITOUT WRITER
// ================================================================================================

/// Serialises an instruction stream back to knitout text.
///
/// The header block is regenerated from the machine spec; instruction lines use the canonical
/// spelling of each operation.
pub fn write_knitout(spec: &MachineSpec, instructions: &[Instruction]) -> String {
    let mut out = String::new();
    out.push_str(";!knitout-2\n");
    out.push_str(";;Carriers:");
    for id in 1..=spec.carrier_count {
        let _ = write!(out, " {id}");
    }
    out.push('\n');
    let _ = writeln!(out, ";;Gauge: {}", spec.gauge);
    let _ = writeln!(out, ";;Width: {}", spec.needle_count);
    let _ = writeln!(out, ";;Position: {:?}", spec.position);
    for instruction in instructions {
        let _ = writeln!(out, "{instruction}");
    }
    out
}

// TESTS
// ================================================================================================
