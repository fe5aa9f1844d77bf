use crate::error::{DecodeError, InvalidReason};

/// Termination discipline applied by the encoder at the far end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    /// Encoder driven to the zero state with `K-1` trailing zero bits.
    Flush,
    /// No termination; the decoder reads exactly `len` columns.
    Truncate,
    /// Encoder's initial state equals its final state.
    TailBiting,
}

/// Description of a rate-1/N binary convolutional code, supplied by the
/// caller. Fields mirror §3/§6 of the decoder specification exactly.
///
/// `next_output[state][input_bit]` is indexed with the most recent bit in
/// the low position (left-shift table convention). `next_term_output`, if
/// present, marks the code as recursive systematic.
#[derive(Debug, Clone)]
pub struct CodeDescriptor {
    pub k: u8,
    pub n: u8,
    pub len: usize,
    pub term: Term,
    pub next_output: Vec<[u32; 2]>,
    pub next_term_output: Option<Vec<u32>>,
    /// Monotonically increasing indices into the full-rate symbol stream
    /// that were punctured at the transmitter.
    pub puncture: Option<Vec<usize>>,
}

impl CodeDescriptor {
    /// Number of shift-register bits, `K - 1`.
    pub fn register_bits(&self) -> u32 {
        self.k as u32 - 1
    }

    /// Number of trellis states, `2^(K-1)`.
    pub fn num_states(&self) -> usize {
        1usize << self.register_bits()
    }

    /// Output stride per state in the trellis's padded output table:
    /// 2 when `N == 2`, 4 otherwise.
    pub fn olen(&self) -> usize {
        if self.n == 2 { 2 } else { 4 }
    }

    /// Number of trellis columns, `len + K - 1` under FLUSH, `len` otherwise.
    pub fn num_columns(&self) -> usize {
        match self.term {
            Term::Flush => self.len + self.register_bits() as usize,
            Term::Truncate | Term::TailBiting => self.len,
        }
    }

    /// `K=5` -> state mask 0x0e, `K=7` -> 0x3e; preserved verbatim from the
    /// reference implementation rather than derived, per the design notes.
    pub fn state_mask(&self) -> u32 {
        match self.k {
            5 => 0x0e,
            7 => 0x3e,
            _ => 0,
        }
    }

    /// Validate the raw descriptor fields against §4.6's acceptance rules.
    /// Does not check recursive-systematic-bit existence — that is a
    /// trellis-construction failure (PROTOCOL), not an INVALID descriptor.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.k != 5 && self.k != 7 {
            return Err(DecodeError::Invalid(InvalidReason::ConstraintLength(self.k)));
        }
        if !(2..=4).contains(&self.n) {
            return Err(DecodeError::Invalid(InvalidReason::Rate(self.n)));
        }
        if self.len < 1 {
            return Err(DecodeError::Invalid(InvalidReason::ZeroLength));
        }
        let expected_states = self.num_states();
        if self.next_output.len() != expected_states {
            return Err(DecodeError::Invalid(InvalidReason::OutputTableSize {
                expected: expected_states,
                found: self.next_output.len(),
            }));
        }
        if let Some(term_out) = &self.next_term_output {
            if term_out.len() != expected_states {
                return Err(DecodeError::Invalid(InvalidReason::TermOutputTableSize {
                    expected: expected_states,
                    found: term_out.len(),
                }));
            }
        }
        if let Some(punc) = &self.puncture {
            if !punc.windows(2).all(|w| w[0] < w[1]) {
                return Err(DecodeError::Invalid(InvalidReason::PunctureNotMonotonic));
            }
        }
        Ok(())
    }

    /// True for recursive systematic codes (a terminating-output table was
    /// supplied).
    pub fn is_recursive(&self) -> bool {
        self.next_term_output.is_some()
    }
}
