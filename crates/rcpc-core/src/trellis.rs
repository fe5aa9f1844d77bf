use crate::descriptor::CodeDescriptor;
use crate::error::{DecodeError, ProtocolReason};

/// Reverses the bit order of an `n`-bit word, `n` in `1..=6`. Bridges the
/// shift-right register convention used for state numbering here with the
/// low-bit-newest convention the caller's transition tables use.
pub(crate) fn bitswap(v: u32, n: u32) -> u32 {
    let mut out = 0;
    for i in 0..n {
        if v & (1 << i) != 0 {
            out |= 1 << (n - 1 - i);
        }
    }
    out
}

/// Maps a code bit to a bipolar sample: bit 0 -> +1, bit 1 -> -1.
#[inline]
fn bit2nrz(word: u32, i: u32) -> i8 {
    if (word >> i) & 1 != 0 { -1 } else { 1 }
}

/// Precomputed, per-state trellis data. Pure function of the code
/// descriptor (spec §3 invariant); building it twice yields identical
/// `outputs`/`vals`.
#[derive(Debug, Clone)]
pub struct Trellis {
    pub num_states: usize,
    pub olen: usize,
    /// `outputs[state * olen + i]`: bipolar sample `i` of the surviving
    /// incoming transition to `state`.
    pub outputs: Vec<i8>,
    /// Information bit whose emission produced each state on its surviving
    /// transition (recursive codes XOR this with the actual input bit at
    /// traceback time).
    pub vals: Vec<u8>,
}

impl Trellis {
    pub fn build(desc: &CodeDescriptor) -> Result<Self, DecodeError> {
        let num_states = desc.num_states();
        let olen = desc.olen();
        let n = desc.n as u32;
        let k = desc.k as u32;
        let mask = desc.state_mask();

        let mut outputs = vec![0i8; num_states * olen];
        let mut vals = vec![0u8; num_states];

        let systematic_pos = if desc.is_recursive() {
            Some(find_systematic_bit(desc)?)
        } else {
            None
        };

        for state in 0..num_states {
            let reg = state as u32;
            let prev0 = (reg << 1) & mask;
            let val0 = (reg >> (k - 2)) & 1;
            let prev0_swapped = bitswap(prev0, k - 1);

            let (val, word) = if let (Some(pos), Some(term_out)) =
                (systematic_pos, desc.next_term_output.as_ref())
            {
                let val1 = (term_out[prev0_swapped as usize] >> pos) & 1;
                let val = val0 ^ val1;
                let word = desc.next_output[prev0_swapped as usize][val as usize];
                (val, word)
            } else {
                let word = desc.next_output[prev0_swapped as usize][val0 as usize];
                (val0, word)
            };

            vals[state] = val as u8;

            let word = bitswap(word, n);
            for i in 0..n {
                outputs[state * olen + i as usize] = bit2nrz(word, i);
            }
        }

        Ok(Trellis { num_states, olen, outputs, vals })
    }
}

/// Locates the systematic bit position `p`: the unique `i` such that bit `i`
/// of `next_output[state][0]` is zero for every state. Fails with
/// `PROTOCOL` if no such column exists.
fn find_systematic_bit(desc: &CodeDescriptor) -> Result<u32, DecodeError> {
    let n = desc.n as u32;
    for i in 0..n {
        if desc.next_output.iter().all(|row| (row[0] >> i) & 1 == 0) {
            return Ok(i);
        }
    }
    Err(DecodeError::Protocol(ProtocolReason::NoSystematicBit))
}
