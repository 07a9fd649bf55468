use knitout_core::{
    CarrierSet, Direction, Instruction, Needle, NeedleOp, OpKind, Position, RackState,
};

use super::parse_program;
use crate::ParseError;

#[test]
fn parses_a_minimal_program() {
    let program = parse_program(
        ";!knitout-2\n\
         ;;Carriers: 1 2 3 4 5 6 7 8 9 10\n\
         inhook 1\n\
         tuck - f1 1\n\
         releasehook 1\n\
         outhook 1\n",
    )
    .unwrap();
    assert_eq!(program.spec.carrier_count, 10);
    assert_eq!(
        program.instructions,
        vec![
            Instruction::Inhook(1),
            Instruction::Needle(NeedleOp {
                kind: OpKind::Tuck,
                needle: Needle::front(1),
                direction: Some(Direction::Leftward),
                carriers: CarrierSet::new([1]),
            }),
            Instruction::Releasehook(1),
            Instruction::Outhook(1),
        ]
    );
}

#[test]
fn parses_two_needle_operations() {
    let program = parse_program("split + f3 b3 2\nxfer b4 f4\n").unwrap();
    assert_eq!(
        program.instructions,
        vec![
            Instruction::Needle(NeedleOp {
                kind: OpKind::Split { target: Needle::back(3) },
                needle: Needle::front(3),
                direction: Some(Direction::Rightward),
                carriers: CarrierSet::new([2]),
            }),
            Instruction::Needle(NeedleOp {
                kind: OpKind::Xfer { target: Needle::front(4) },
                needle: Needle::back(4),
                direction: None,
                carriers: None,
            }),
        ]
    );
}

#[test]
fn parses_fractional_racking() {
    let program = parse_program("rack 2\nrack -0.75\n").unwrap();
    assert_eq!(
        program.instructions,
        vec![
            Instruction::Rack(RackState::new(2, false)),
            Instruction::Rack(RackState::new(-1, true)),
        ]
    );
}

#[test]
fn keeps_comments_in_stream_order() {
    let program = parse_program("; leading note\ntuck + f1 1 ; trailing note\npause\n").unwrap();
    assert_eq!(program.instructions.len(), 4);
    assert_eq!(program.instructions[0], Instruction::Comment(" leading note".into()));
    assert_eq!(program.instructions[2], Instruction::Comment(" trailing note".into()));
    assert_eq!(program.instructions[3], Instruction::Pause);
}

#[test]
fn header_block_configures_the_spec() {
    let program =
        parse_program(";!knitout-2\n;;Position: Keep\n;;Gauge: 5\n;;Width: 120\nknit + f0 1\n")
            .unwrap();
    assert_eq!(program.spec.position, Position::Keep);
    assert_eq!(program.spec.gauge, 5);
    assert_eq!(program.spec.needle_count, 120);
}

#[test]
fn plating_carrier_pairs_parse() {
    let program = parse_program("knit + f0 2 3\n").unwrap();
    let Instruction::Needle(op) = &program.instructions[0] else {
        panic!("expected a needle op");
    };
    assert_eq!(op.carriers, CarrierSet::new([2, 3]));
}

#[test]
fn rejects_malformed_instructions() {
    assert_eq!(
        parse_program("frob + f1 1\n"),
        Err(ParseError::UnknownOperation { line: 1, op: "frob".into() })
    );
    assert_eq!(
        parse_program("knit f1 1\n"),
        Err(ParseError::InvalidDirection { line: 1, token: "f1".into() })
    );
    assert_eq!(
        parse_program("knit + c1 1\n"),
        Err(ParseError::InvalidNeedle { line: 1, token: "c1".into() })
    );
    assert_eq!(
        parse_program("\nknit + f1 11\n"),
        Err(ParseError::InvalidCarriers { line: 2, token: "[11]".into() })
    );
    assert_eq!(
        parse_program("xfer f1 b1 1\n"),
        Err(ParseError::TrailingToken { line: 1, token: "1".into() })
    );
    assert_eq!(
        parse_program("inhook\n"),
        Err(ParseError::MissingArgument { line: 1, op: "inhook", what: "carrier" })
    );
}

#[test]
fn extension_lines_become_comments() {
    let program = parse_program("x-presser-mode auto\nknit + f0 1\n").unwrap();
    assert!(matches!(program.instructions[0], Instruction::Comment(_)));
    assert_eq!(program.instructions.len(), 2);
}
