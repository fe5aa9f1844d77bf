mod common;

use common::*;
use rcpc_core::{decode, Term};

fn k5_polys_rate4() -> Vec<Vec<bool>> {
    vec![
        vec![true, true, false, false, true],
        vec![true, false, true, true, true],
        vec![true, true, true, false, true],
        vec![true, true, false, true, true],
    ]
}

fn k7_polys_rate2_recursive() -> (Vec<Vec<bool>>, Vec<u32>) {
    let polys = vec![
        vec![true, false, false, false, false, false, false], // systematic
        vec![true, true, false, true, false, true, false],    // parity
    ];
    let fb_taps = vec![0u32, 2, 4];
    (polys, fb_taps)
}

fn k7_polys_rate3() -> Vec<Vec<bool>> {
    vec![
        vec![true, true, true, true, true, true, true],
        vec![true, true, false, true, true, false, true],
        vec![true, false, true, false, true, false, true],
    ]
}

/// S2: K=7, N=2, len=40, recursive systematic, tail-biting.
#[test]
fn s2_tail_biting_recursive_round_trip() {
    let (polys, fb_taps) = k7_polys_rate2_recursive();
    let next_output = build_output_table(7, &polys);
    let next_term_output = build_term_output(&next_output, &fb_taps);
    let desc = descriptor(
        7,
        2,
        40,
        Term::TailBiting,
        next_output,
        Some(next_term_output),
        None,
    );

    let message = pseudo_random_bits(40, 0xC0FFEE);
    let soft = encode_tail_biting(&desc, &message, Some(&fb_taps));

    let decoded = decode(&desc, &soft).expect("tail-biting decode should succeed");
    assert_eq!(decoded, message);
}

/// S3: K=5, N=4, len=185, punctured (remove every 4th symbol after offset 3).
#[test]
fn s3_punctured_round_trip() {
    let next_output = build_output_table(5, &k5_polys_rate4());
    let len = 185usize;
    let k_minus_1 = 4usize;
    let full_rate_len = (len + k_minus_1) * 4;
    let puncture_positions: Vec<usize> = (3..full_rate_len).step_by(4).collect();

    let desc = descriptor(
        5,
        4,
        len,
        Term::Flush,
        next_output,
        None,
        Some(puncture_positions.clone()),
    );

    let mut message = pseudo_random_bits(len, 0xBADC0DE);
    message.extend(std::iter::repeat(0u8).take(k_minus_1));

    let full_rate_soft = encode(&desc, &message, None);
    assert_eq!(full_rate_soft.len(), full_rate_len);

    let wire_soft = puncture(&full_rate_soft, &puncture_positions);
    assert_eq!(wire_soft.len(), full_rate_len - puncture_positions.len());

    let decoded = decode(&desc, &wire_soft).expect("punctured decode should succeed");
    assert_eq!(decoded, message[..len]);
}

/// S4: K=7, N=3, len=576, FLUSH; single-sample error should still correct.
#[test]
fn s4_single_symbol_error_is_corrected() {
    let next_output = build_output_table(7, &k7_polys_rate3());
    let len = 576usize;
    let desc = descriptor(7, 3, len, Term::Flush, next_output, None, None);

    let mut message = pseudo_random_bits(len, 0x1337);
    message.extend(std::iter::repeat(0u8).take(6));

    let mut soft = encode(&desc, &message, None);
    soft[0] = -soft[0];

    let decoded = decode(&desc, &soft).expect("flush decode should succeed");
    assert_eq!(decoded, message[..len]);
}

/// Property: building the same descriptor's decoder twice and decoding the
/// same input produces the same output (trellis construction is a pure
/// function of the descriptor).
#[test]
fn decoding_is_deterministic_across_runs() {
    let next_output = build_output_table(5, &k5_polys_rate4());
    let len = 50usize;
    let desc = descriptor(5, 4, len, Term::Flush, next_output, None, None);

    let mut message = pseudo_random_bits(len, 42);
    message.extend(std::iter::repeat(0u8).take(4));
    let soft = encode(&desc, &message, None);

    let first = decode(&desc, &soft).unwrap();
    let second = decode(&desc, &soft).unwrap();
    assert_eq!(first, second);
}
