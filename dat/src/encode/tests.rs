use alloc::vec::Vec;

use proptest::prelude::*;

use super::{DATA_OFFSET, HEADER_SIZE, encode_dat, run_length_encode};
use crate::{PALETTE, RasterError};

fn rle_decode(pairs: &[u8], width: usize) -> Vec<Vec<u8>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    for chunk in pairs.chunks_exact(2) {
        for _ in 0..chunk[1] {
            row.push(chunk[0]);
            if row.len() == width {
                rows.push(core::mem::take(&mut row));
            }
        }
    }
    rows
}

#[test]
fn runs_are_capped_and_stay_within_rows() {
    let rows = vec![vec![5u8; 300], vec![5u8; 300]];
    let pairs = run_length_encode(&rows);
    // each row becomes a 255-run and a 45-run
    assert_eq!(pairs, vec![5, 255, 5, 45, 5, 255, 5, 45]);
    assert_eq!(rle_decode(&pairs, 300), rows);
}

#[test]
fn alternating_pixels_encode_pairwise() {
    let rows = vec![vec![1u8, 1, 2, 2, 2, 0]];
    assert_eq!(run_length_encode(&rows), vec![1, 2, 2, 3, 0, 1]);
}

#[test]
fn header_fields_are_little_endian() {
    let rows = vec![vec![0u8; 111]; 23];
    let bytes = encode_dat(&rows).unwrap();
    assert_eq!(&bytes[0x00..0x02], &[0, 0]);
    assert_eq!(&bytes[0x04..0x06], &110u16.to_le_bytes());
    assert_eq!(&bytes[0x06..0x08], &22u16.to_le_bytes());
    assert_eq!(&bytes[0x08..0x0a], &1000u16.to_le_bytes());
    assert_eq!(&bytes[0x10..0x12], &1000u16.to_le_bytes());
    // the rest of the header is zero
    assert!(bytes[0x12..HEADER_SIZE].iter().all(|&b| b == 0));

    // palette section: the constant plus zero padding
    assert_eq!(&bytes[HEADER_SIZE..HEADER_SIZE + 768], &PALETTE[..]);
    assert!(bytes[HEADER_SIZE + 768..DATA_OFFSET].iter().all(|&b| b == 0));

    // 23 identical blank rows encode as one pair each
    assert_eq!(bytes.len(), DATA_OFFSET + 23 * 2);
}

#[test]
fn ragged_grids_are_rejected() {
    let rows = vec![vec![0u8; 10], vec![0u8; 11]];
    assert_eq!(
        encode_dat(&rows).unwrap_err(),
        RasterError::RowWidthMismatch { expected: 10, actual: 11 }
    );
    assert_eq!(encode_dat(&[]).unwrap_err(), RasterError::EmptyPattern);
}

proptest! {
    #[test]
    fn rle_round_trips_any_grid(
        rows in prop::collection::vec(prop::collection::vec(0u8..8, 64), 1..12)
    ) {
        let pairs = run_length_encode(&rows);
        prop_assert_eq!(rle_decode(&pairs, 64), rows);
        // every run fits a byte and no pair crosses a row boundary
        prop_assert_eq!(pairs.len() % 2, 0);
    }
}
