/// Selects which of the six specialized branch-metric routines a decoder
/// uses, as decided once at construction from `(K, N)`. The six
/// configurations are functionally identical (§4.3) — they exist as
/// separate tags only so a future SIMD backend can specialize per
/// configuration without touching the dispatch site; the portable
/// implementation below is shared by all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    K5N2,
    K5N3,
    K5N4,
    K7N2,
    K7N3,
    K7N4,
}

impl Kernel {
    pub fn select(k: u8, n: u8) -> Option<Kernel> {
        use Kernel::*;
        match (k, n) {
            (5, 2) => Some(K5N2),
            (5, 3) => Some(K5N3),
            (5, 4) => Some(K5N4),
            (7, 2) => Some(K7N2),
            (7, 3) => Some(K7N3),
            (7, 4) => Some(K7N4),
            _ => None,
        }
    }

    /// Runs one trellis column: computes branch metrics for this column's
    /// `n` received samples, adds them to the previous column's path sums,
    /// selects a survivor per state, and writes the decisions into
    /// `paths_col`. `sums` is replaced in place with the new column's
    /// metrics. `bm_scratch` is reused across columns to avoid a
    /// per-column allocation.
    #[allow(clippy::too_many_arguments)]
    pub fn run_column(
        &self,
        seq: &[i8],
        outputs: &[i8],
        olen: usize,
        n: usize,
        sums: &mut [i16],
        paths_col: &mut [i16],
        bm_scratch: &mut [i16],
        prev_scratch: &mut [i16],
        norm: bool,
    ) {
        forward_column(seq, outputs, olen, n, sums, paths_col, bm_scratch, prev_scratch, norm)
    }
}

/// Shared forward-recursion core for all six `(K, N)` kernels (spec §4.3).
///
/// Exploits butterfly symmetry: states `s` and `s ^ (S/2)` share outgoing
/// transitions symmetrically, so only one dot product per butterfly pair is
/// computed; the other is its negation.
#[allow(clippy::too_many_arguments)]
fn forward_column(
    seq: &[i8],
    outputs: &[i8],
    olen: usize,
    n: usize,
    sums: &mut [i16],
    paths_col: &mut [i16],
    bm: &mut [i16],
    prev_sums: &mut [i16],
    norm: bool,
) {
    let num_states = sums.len();
    let half = num_states / 2;

    for s in 0..half {
        let row = &outputs[s * olen..s * olen + n];
        let mut acc: i32 = 0;
        for i in 0..n {
            acc += seq[i] as i32 * row[i] as i32;
        }
        bm[s] = acc as i16;
        bm[s + half] = -bm[s];
    }

    // `sums` holds the previous column's metrics on entry; we need them
    // while writing the new column, so snapshot into the scratch buffer
    // before overwriting `sums` in place.
    prev_sums.copy_from_slice(sums);

    for target in 0..num_states {
        let p0 = (2 * target) % num_states;
        let p1 = p0 + 1;
        let metric0 = prev_sums[p0] as i32 + bm[target] as i32;
        let metric1 = prev_sums[p1] as i32 - bm[target] as i32;

        if metric1 > metric0 {
            sums[target] = metric1 as i16;
            paths_col[target] = 0;
        } else {
            sums[target] = metric0 as i16;
            paths_col[target] = -1;
        }
    }

    if norm {
        let min = sums.iter().copied().min().unwrap_or(0);
        for s in sums.iter_mut() {
            *s -= min;
        }
    }
}
