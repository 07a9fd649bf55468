use alloc::vec::Vec;

use knitout_core::MachineSpec;
use knitout_processor::{Schedule, schedule_program};
use knitout_syntax::parse_program;

use super::compile_schedule;
use crate::{
    RasterError, RasterParams, build_raster_grid, finish_rasters, rasterize_schedule,
    startup_rasters,
    codes::{STOPPING_MARK, WIDTH_SPECIFIER},
};

fn scheduled(knitout: &str) -> (Schedule, MachineSpec) {
    let program = parse_program(knitout).unwrap();
    let schedule = schedule_program(&program).unwrap();
    (schedule, program.spec)
}

fn grid(knitout: &str) -> Vec<Vec<u8>> {
    let (schedule, spec) = scheduled(knitout);
    let params = RasterParams::default();
    let width = schedule.knitting_width();
    let startup = startup_rasters(width, &spec).unwrap();
    let pattern = rasterize_schedule(&schedule, &spec).unwrap();
    let finish = finish_rasters(width, &spec).unwrap();
    build_raster_grid(&startup, &pattern, &finish, width, &params).unwrap()
}

const SINGLE_TUCK: &str = "inhook 1\ntuck - f1 1\nreleasehook 1\nouthook 1\n";

#[test]
fn single_tuck_compiles_to_a_complete_dat() {
    let (schedule, spec) = scheduled(SINGLE_TUCK);
    assert_eq!(schedule.knitting_width(), 1);
    let bytes = compile_schedule(&schedule, &spec, &RasterParams::default()).unwrap();

    // 23 rows of 111 pixels: 5 bottom margin, 3 startup, 4 pattern, 3 finish, a blank row,
    // the ruler, and 6 top margin
    assert_eq!(&bytes[0x04..0x06], &110u16.to_le_bytes());
    assert_eq!(&bytes[0x06..0x08], &22u16.to_le_bytes());
    assert_eq!(&bytes[0x08..0x0a], &1000u16.to_le_bytes());
    assert_eq!(&bytes[0x10..0x12], &1000u16.to_le_bytes());
}

#[test]
fn compilation_is_reproducible() {
    let (schedule, spec) = scheduled(SINGLE_TUCK);
    let params = RasterParams::default();
    let first = compile_schedule(&schedule, &spec, &params).unwrap();
    let second = compile_schedule(&schedule, &spec, &params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn every_grid_row_has_the_same_width() {
    let rows = grid(SINGLE_TUCK);
    assert_eq!(rows.len(), 23);
    assert!(rows.iter().all(|row| row.len() == 111));
    // margins and the spacer under the ruler are blank
    assert!(rows[..5].iter().all(|row| row.iter().all(|&p| p == 0)));
    assert!(rows[15].iter().all(|&p| p == 0));
    assert!(rows[17..].iter().all(|row| row.iter().all(|&p| p == 0)));
}

#[test]
fn pass_rows_carry_two_stop_marks_in_the_band() {
    let rows = grid(SINGLE_TUCK);
    let params = RasterParams::default();
    let band = params.option_margin_width()..params.option_margin_width() + 2 * params.pattern_space + 3;
    for row in &rows[5..15] {
        let marks = row[band.clone()].iter().filter(|&&p| p == STOPPING_MARK).count();
        assert_eq!(marks, 2, "each pass row frames its band with two marks");
    }
}

#[test]
fn the_width_ruler_measures_the_pattern() {
    // ten slots at the default buffers: 20 specifier pixels flanked by the option margins
    let knitout = "inhook 1\n\
        knit - f9 1\nknit - f8 1\nknit - f7 1\nknit - f6 1\nknit - f5 1\n\
        knit - f4 1\nknit - f3 1\nknit - f2 1\nknit - f1 1\nknit - f0 1\n\
        releasehook 1\nouthook 1\n";
    let rows = grid(knitout);
    let ruler = rows[rows.len() - 7].clone();
    let margin = RasterParams::default().option_margin_width();
    assert!(ruler[..margin].iter().all(|&p| p == 0));
    assert!(ruler[margin..margin + 20].iter().all(|&p| p == WIDTH_SPECIFIER));
    assert!(ruler[margin + 20..].iter().all(|&p| p == 0));
    assert_eq!(ruler.len(), margin * 2 + 20);
}

#[test]
fn programs_without_needle_operations_cannot_compile() {
    let (schedule, spec) = scheduled("inhook 1\nouthook 1\n");
    assert_eq!(
        compile_schedule(&schedule, &spec, &RasterParams::default()).unwrap_err(),
        RasterError::EmptyPattern
    );
}
