use crate::depuncture::depuncture;
use crate::descriptor::{CodeDescriptor, Term};
use crate::error::{DecodeError, InvalidReason, ProtocolReason};
use crate::kernel::Kernel;
use crate::trellis::Trellis;
use crate::path_memory::PathMemory;

/// Owns everything needed for one decode: the trellis, the path memory, the
/// accumulated metrics, and per-column scratch. Not thread-safe, not reused
/// across decodes (§5) — the teacher's `ViterbiDecoder` is similarly a
/// one-shot-per-call value, constructed fresh by the entry point below.
pub struct Decoder {
    k: u8,
    n: u8,
    recursive: bool,
    mask: u32,
    num_columns: usize,
    intrvl: usize,
    trellis: Trellis,
    kernel: Kernel,
    paths: PathMemory,
    sums: Vec<i16>,
    bm_scratch: Vec<i16>,
    prev_scratch: Vec<i16>,
    depunct_scratch: Vec<i8>,
}

impl Decoder {
    /// Builds a decoder for `desc`. `desc` must already have passed
    /// [`CodeDescriptor::validate`]; trellis construction can still fail
    /// with `PROTOCOL` if a recursive descriptor lacks a systematic bit.
    pub fn new(desc: &CodeDescriptor) -> Result<Self, DecodeError> {
        let kernel = Kernel::select(desc.k, desc.n)
            .ok_or(DecodeError::Invalid(InvalidReason::ConstraintLength(desc.k)))?;
        let trellis = Trellis::build(desc)?;
        let num_states = trellis.num_states;
        let num_columns = desc.num_columns();

        // Budgets K columns' worth of metric growth before the first
        // forced normalization; preserved verbatim from the reference
        // bound rather than simplified (spec §9).
        let intrvl = (i16::MAX as i64 / (desc.n as i64 * i8::MAX as i64)) as usize - desc.k as usize;

        let paths = PathMemory::try_new(num_columns, num_states)?;

        let mut sums = Vec::new();
        sums.try_reserve_exact(num_states).map_err(|_| DecodeError::NoMem)?;
        sums.resize(num_states, 0);

        let mut bm_scratch = Vec::new();
        bm_scratch.try_reserve_exact(num_states).map_err(|_| DecodeError::NoMem)?;
        bm_scratch.resize(num_states, 0);

        let mut prev_scratch = Vec::new();
        prev_scratch.try_reserve_exact(num_states).map_err(|_| DecodeError::NoMem)?;
        prev_scratch.resize(num_states, 0);

        let mut depunct_scratch = Vec::new();
        let depunct_len = num_columns * desc.n as usize;
        depunct_scratch.try_reserve_exact(depunct_len).map_err(|_| DecodeError::NoMem)?;
        depunct_scratch.resize(depunct_len, 0);

        tracing::debug!(
            k = desc.k, n = desc.n, len = desc.len, num_columns, num_states,
            recursive = desc.is_recursive(),
            "decoder constructed"
        );

        Ok(Decoder {
            k: desc.k,
            n: desc.n,
            recursive: desc.is_recursive(),
            mask: desc.state_mask(),
            num_columns,
            intrvl,
            trellis,
            kernel,
            paths,
            sums,
            bm_scratch,
            prev_scratch,
            depunct_scratch,
        })
    }

    /// Zeroes the accumulated metrics. For any termination other than
    /// tail-biting, forces state 0 to dominate initially since the encoder
    /// is known to start there.
    fn reset(&mut self, term: Term) {
        self.sums.iter_mut().for_each(|s| *s = 0);
        if term != Term::TailBiting {
            self.sums[0] = i8::MAX as i16 * self.n as i16 * self.k as i16;
        }
    }

    /// Runs the forward recursion once over `seq` (already depunctured, if
    /// applicable), writing one path-memory column per trellis column.
    fn forward(&mut self, seq: &[i8]) {
        let n = self.n as usize;
        let olen = self.trellis.olen;
        let intrvl = self.intrvl.max(1);
        for i in 0..self.num_columns {
            let norm = i % intrvl == 0;
            let column_seq = &seq[i * n..i * n + n];
            self.kernel.run_column(
                column_seq,
                &self.trellis.outputs,
                olen,
                n,
                &mut self.sums,
                self.paths.column_mut(i),
                &mut self.bm_scratch,
                &mut self.prev_scratch,
                norm,
            );
        }
    }

    /// Full decode: reset, optional depuncture, forward recursion(s),
    /// traceback (spec §4.4).
    pub fn conv_decode(
        &mut self,
        seq: &[i8],
        puncture: Option<&[usize]>,
        term: Term,
        len: usize,
    ) -> Result<Vec<u8>, DecodeError> {
        self.reset(term);

        let full_rate_seq: &[i8] = if let Some(punc) = puncture {
            depuncture(seq, punc, &mut self.depunct_scratch);
            tracing::trace!(punctured = punc.len(), "depunctured received stream");
            &self.depunct_scratch
        } else {
            seq
        };

        self.forward(full_rate_seq);
        if term == Term::TailBiting {
            self.forward(full_rate_seq);
        }

        self.traceback(term, len)
    }

    /// Reconstructs the decoded information bits by walking survivor
    /// decisions backward from the terminal state (spec §4.5).
    fn traceback(&self, term: Term, len: usize) -> Result<Vec<u8>, DecodeError> {
        let mut state = match term {
            Term::Flush => 0usize,
            Term::Truncate | Term::TailBiting => {
                // Keeps the *first* maximum on ties, matching the reference
                // traceback's `sum > max` comparison.
                let mut argmax_state = 0usize;
                let mut max = self.sums[0];
                for (i, &v) in self.sums.iter().enumerate().skip(1) {
                    if v > max {
                        max = v;
                        argmax_state = i;
                    }
                }
                if max < 0 {
                    return Err(DecodeError::Protocol(ProtocolReason::NoSurvivingPath));
                }
                argmax_state
            }
        };
        tracing::trace!(terminal_state = state, "traceback starting");

        let rewind = |state: usize, path: usize| -> usize {
            (((state as u32) << 1) & self.mask) as usize | path
        };

        // Walk off the K-1 tail columns (FLUSH only) without emitting bits.
        for i in (len..self.num_columns).rev() {
            let path = (self.paths.column(i)[state] + 1) as usize;
            state = rewind(state, path);
        }

        let mut out = vec![0u8; len];
        for i in (0..len).rev() {
            let path = (self.paths.column(i)[state] + 1) as u8;
            out[i] = if self.recursive {
                path ^ self.trellis.vals[state]
            } else {
                self.trellis.vals[state]
            };
            state = rewind(state, path as usize);
        }

        Ok(out)
    }
}
