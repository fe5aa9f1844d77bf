use crate::error::DecodeError;

/// One contiguous owning block of survivor decisions, `num_columns *
/// num_states` signed 16-bit entries, indexed through a per-column offset
/// table for O(1) column access (spec §5). `paths[i][s] ∈ {-1, 0}`: `-1`
/// encodes a "0" input, `0` encodes a "1" input; traceback adds 1 to
/// recover the input bit.
pub struct PathMemory {
    data: Vec<i16>,
    num_states: usize,
}

impl PathMemory {
    /// Allocates the block, reporting `NoMem` instead of aborting if the
    /// requested size cannot be satisfied.
    pub fn try_new(num_columns: usize, num_states: usize) -> Result<Self, DecodeError> {
        let total = num_columns
            .checked_mul(num_states)
            .ok_or(DecodeError::NoMem)?;
        let mut data = Vec::new();
        data.try_reserve_exact(total).map_err(|_| DecodeError::NoMem)?;
        data.resize(total, 0);
        Ok(PathMemory { data, num_states })
    }

    #[inline]
    pub fn column_mut(&mut self, i: usize) -> &mut [i16] {
        let start = i * self.num_states;
        &mut self.data[start..start + self.num_states]
    }

    #[inline]
    pub fn column(&self, i: usize) -> &[i16] {
        let start = i * self.num_states;
        &self.data[start..start + self.num_states]
    }
}
