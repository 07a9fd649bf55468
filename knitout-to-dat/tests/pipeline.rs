use knitout_core::{Instruction, OpKind};
use knitout_syntax::parse_program;
use knitout_to_dat::{ConvertError, dat_to_knitout, knitout_to_dat};

/// The needle operations and hook/rack instructions of a program, with comments dropped and
/// scheduler kicks ignored.
fn semantic(knitout: &str) -> Vec<Instruction> {
    parse_program(knitout)
        .unwrap()
        .instructions
        .into_iter()
        .filter(|instruction| match instruction {
            Instruction::Comment(_) => false,
            Instruction::Needle(op) => !op.kind.is_kick(),
            _ => true,
        })
        .collect()
}

#[test]
fn a_program_survives_the_full_round_trip() {
    let knitout = "\
        ;!knitout-2\n\
        ;;Carriers: 1 2 3 4 5 6 7 8 9 10\n\
        ;;Position: Left\n\
        inhook 1\n\
        knit - f3 1\nknit - f2 1\nknit - f1 1\nknit - f0 1\n\
        releasehook 1\n\
        knit + f0 1\nknit + f1 1\nknit + f2 1\nknit + f3 1\n\
        xfer f1 b1\nxfer f2 b2\n\
        knit - f3 1\nknit - b2 1\nknit - b1 1\nknit - f0 1\n\
        outhook 1\n";
    let dat = knitout_to_dat(knitout).unwrap();
    let recovered = dat_to_knitout(&dat).unwrap();
    assert_eq!(semantic(&recovered), semantic(knitout));
}

#[test]
fn compiled_bytes_are_stable() {
    let knitout = "inhook 3\ntuck - f1 3\nreleasehook 3\nouthook 3\n";
    assert_eq!(knitout_to_dat(knitout).unwrap(), knitout_to_dat(knitout).unwrap());
}

#[test]
fn the_single_tuck_dat_has_the_expected_shape() {
    let dat = knitout_to_dat("inhook 1\ntuck - f1 1\nreleasehook 1\nouthook 1\n").unwrap();
    // 111 x 23 pixels: header extents are inclusive
    assert_eq!(&dat[0x04..0x06], &110u16.to_le_bytes());
    assert_eq!(&dat[0x06..0x08], &22u16.to_le_bytes());

    let recovered = dat_to_knitout(&dat).unwrap();
    let instructions = semantic(&recovered);
    // the tuck shifts down one slot because the pattern never touches slot 0
    assert_eq!(
        instructions.iter().filter(|i| matches!(i, Instruction::Needle(_))).count(),
        1
    );
    assert!(matches!(
        &instructions[..],
        [
            Instruction::Inhook(1),
            Instruction::Needle(op),
            Instruction::Releasehook(1),
            Instruction::Outhook(1),
        ] if op.kind == OpKind::Tuck && op.needle.position == 0
    ));
}

#[test]
fn too_wide_patterns_fail_with_the_offending_position() {
    let knitout = "\
        inhook 1\ntuck + f535 1\nreleasehook 1\n\
        inhook 2\ntuck + f520 2\ntuck + f530 2\nreleasehook 2\n\
        outhook 1\nouthook 2\n";
    match knitout_to_dat(knitout) {
        Err(ConvertError::Schedule(err)) => {
            assert!(err.to_string().contains("541"));
        },
        other => panic!("expected a schedule failure, got {other:?}"),
    }
}

#[test]
fn keep_positioning_validates_the_needle_range() {
    let knitout = "\
        ;;Position: Keep\n\
        inhook 1\ntuck - f0 1\nreleasehook 1\nouthook 1\n";
    assert!(matches!(knitout_to_dat(knitout), Err(ConvertError::Schedule(_))));
}

#[test]
fn files_round_trip_on_disk() {
    let dir = std::env::temp_dir();
    let knitout_path = dir.join("knitout_to_dat_pipeline_test.knitout");
    let dat_path = dir.join("knitout_to_dat_pipeline_test.dat");
    let back_path = dir.join("knitout_to_dat_pipeline_test_back.knitout");

    let knitout = "inhook 1\nknit - f1 1\nknit - f0 1\nreleasehook 1\nouthook 1\n";
    std::fs::write(&knitout_path, knitout).unwrap();
    knitout_to_dat::convert_file(&knitout_path, &dat_path).unwrap();
    knitout_to_dat::invert_file(&dat_path, &back_path).unwrap();

    let recovered = std::fs::read_to_string(&back_path).unwrap();
    assert_eq!(semantic(&recovered), semantic(knitout));

    for path in [knitout_path, dat_path, back_path] {
        let _ = std::fs::remove_file(path);
    }
}
