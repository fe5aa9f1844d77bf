use std::fmt;

/// Why a code descriptor was rejected before any decoding work started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// `K` was not 5 or 7.
    ConstraintLength(u8),
    /// `N` was outside `[2,4]`.
    Rate(u8),
    /// `len` was zero.
    ZeroLength,
    /// `next_output` did not have exactly `2^(K-1)` rows.
    OutputTableSize { expected: usize, found: usize },
    /// `next_term_output` was present but did not have `2^(K-1)` rows.
    TermOutputTableSize { expected: usize, found: usize },
    /// The puncture list was not monotonically increasing.
    PunctureNotMonotonic,
}

/// Why trellis construction or traceback could not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolReason {
    /// A recursive descriptor's `next_output` table has no column that is
    /// zero for every state's "input 0" output, so no systematic bit
    /// position could be identified.
    NoSystematicBit,
    /// Traceback found no state with a positive accumulated metric.
    NoSurvivingPath,
}

/// Error taxonomy for the decoder's public entry point (spec §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    Invalid(InvalidReason),
    NoMem,
    Protocol(ProtocolReason),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Invalid(InvalidReason::ConstraintLength(k)) => {
                write!(f, "unsupported constraint length K={k} (must be 5 or 7)")
            }
            DecodeError::Invalid(InvalidReason::Rate(n)) => {
                write!(f, "unsupported rate N={n} (must be 2..=4)")
            }
            DecodeError::Invalid(InvalidReason::ZeroLength) => {
                write!(f, "information length must be at least 1")
            }
            DecodeError::Invalid(InvalidReason::OutputTableSize { expected, found }) => {
                write!(f, "next_output table has {found} rows, expected {expected}")
            }
            DecodeError::Invalid(InvalidReason::TermOutputTableSize { expected, found }) => {
                write!(f, "next_term_output table has {found} rows, expected {expected}")
            }
            DecodeError::Invalid(InvalidReason::PunctureNotMonotonic) => {
                write!(f, "puncture list is not monotonically increasing")
            }
            DecodeError::NoMem => write!(f, "allocation failed while building the decoder"),
            DecodeError::Protocol(ProtocolReason::NoSystematicBit) => {
                write!(f, "recursive descriptor has no systematic bit position")
            }
            DecodeError::Protocol(ProtocolReason::NoSurvivingPath) => {
                write!(f, "traceback found no surviving path")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
