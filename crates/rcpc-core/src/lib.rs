//! Soft-decision Viterbi decoder for short-constraint-length convolutional
//! codes (K in {5,7}, rate 1/N with N in {2,3,4}), with support for
//! recursive systematic codes, puncturing, and the three termination
//! disciplines used by common wireless air interfaces: zero-flush,
//! truncation, and tail-biting.
//!
//! The public entry point is [`decode`]. Everything else is exposed for
//! callers that want to build and reuse a [`Decoder`] across multiple
//! decodes with the same code descriptor.

mod decoder;
mod depuncture;
mod descriptor;
mod error;
mod kernel;
mod path_memory;
mod trellis;

pub use decoder::Decoder;
pub use descriptor::{CodeDescriptor, Term};
pub use error::{DecodeError, InvalidReason, ProtocolReason};
pub use kernel::Kernel;
pub use trellis::Trellis;

/// Validates `descriptor`, builds a one-shot decoder, decodes `soft_bits`,
/// and returns the most-likely information bit sequence (spec §4.6).
///
/// `soft_bits` are signed 8-bit LLR samples, positive meaning "more likely
/// bit 0". Its length must match §6's formula: `(len + (K-1 if FLUSH else
/// 0)) * N`, minus the number of punctured positions if `descriptor.puncture`
/// is set.
pub fn decode(descriptor: &CodeDescriptor, soft_bits: &[i8]) -> Result<Vec<u8>, DecodeError> {
    descriptor.validate()?;
    let mut dec = Decoder::new(descriptor)?;
    dec.conv_decode(
        soft_bits,
        descriptor.puncture.as_deref(),
        descriptor.term,
        descriptor.len,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use descriptor::Term;

    /// Generic reference encoder used only by tests: walks the same
    /// `next_output`/`next_term_output` tables the decoder consumes,
    /// independent of the decoder's internal trellis representation.
    fn encode(desc: &CodeDescriptor, bits: &[u8]) -> Vec<i8> {
        let mask = desc.state_mask();
        let mut state: u32 = 0;
        let mut out = Vec::with_capacity(bits.len() * desc.n as usize);
        for &bit in bits {
            let input = if let Some(term_out) = &desc.next_term_output {
                // Recursive systematic: feed back so the register zeroes
                // under an all-zero input stream, matching the decoder's
                // own recursive-state derivation.
                let sys_pos = find_systematic_bit_for_test(desc);
                let fb = (term_out[state as usize] >> sys_pos) & 1;
                bit ^ fb as u8
            } else {
                bit
            };
            let word = desc.next_output[state as usize][input as usize];
            for i in 0..desc.n as u32 {
                out.push(if (word >> i) & 1 != 0 { -127i8 } else { 127i8 });
            }
            state = ((state << 1) | input as u32) & mask;
        }
        out
    }

    fn find_systematic_bit_for_test(desc: &CodeDescriptor) -> u32 {
        for i in 0..desc.n as u32 {
            if desc.next_output.iter().all(|row| (row[0] >> i) & 1 == 0) {
                return i;
            }
        }
        panic!("no systematic bit in test descriptor");
    }

    fn xcch_like(len: usize) -> CodeDescriptor {
        let polys: [[bool; 5]; 2] = [
            [true, true, false, false, true],
            [true, false, true, true, true],
        ];
        let num_states = 16;
        let mut next_output = vec![[0u32; 2]; num_states];
        for state in 0..num_states {
            for (input_bit, row) in next_output[state].iter_mut().enumerate() {
                let mut word = 0u32;
                for (poly_n, poly) in polys.iter().enumerate() {
                    let mut out_bit = (input_bit as u32) & poly[0] as u32;
                    for (tap_i, &tap) in poly.iter().enumerate().skip(1) {
                        if tap {
                            out_bit ^= (state as u32 >> (tap_i - 1)) & 1;
                        }
                    }
                    word |= out_bit << poly_n;
                }
                *row = word;
            }
        }
        CodeDescriptor {
            k: 5,
            n: 2,
            len,
            term: Term::Flush,
            next_output,
            next_term_output: None,
            puncture: None,
        }
    }

    #[test]
    fn s1_flush_round_trip() {
        let desc = xcch_like(224);
        let message: Vec<u8> =
            (0..224).map(|i| ((i * 2654435761u32) >> 30) as u8 & 1).collect();
        let mut bits = message.clone();
        bits.extend(std::iter::repeat(0u8).take(4));
        let soft = encode(&desc, &bits);
        let decoded = decode(&desc, &soft).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn random_payload_round_trip() {
        // Mirrors the teacher's own `ViterbiDecoder` test: a random payload
        // plus a zero tail, encoded then decoded, must come back unchanged.
        let desc = xcch_like(224);
        let message: Vec<u8> = (0..224).map(|_| rand::random_range(0..2)).collect();
        let mut bits = message.clone();
        bits.extend(std::iter::repeat(0u8).take(4));
        let soft = encode(&desc, &bits);
        let decoded = decode(&desc, &soft).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn s5_bad_constraint_length_is_invalid() {
        let mut desc = xcch_like(10);
        desc.k = 6;
        let err = decode(&desc, &[]).unwrap_err();
        assert_eq!(err, DecodeError::Invalid(InvalidReason::ConstraintLength(6)));
    }

    #[test]
    fn s6_recursive_without_systematic_bit_is_protocol_error() {
        let mut desc = xcch_like(10);
        for row in desc.next_output.iter_mut() {
            row[0] |= 0b11;
        }
        desc.next_term_output = Some(vec![0u32; desc.num_states()]);
        let soft = vec![0i8; desc.num_columns() * desc.n as usize];
        let err = decode(&desc, &soft).unwrap_err();
        assert_eq!(err, DecodeError::Protocol(ProtocolReason::NoSystematicBit));
    }
}
