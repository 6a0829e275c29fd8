//! Information/frozen position tables for the length-64 polar code.
//!
//! Row `i` of the transform matrix has weight `2^popcount(i)`, so placing
//! information bits only on indices with at least three set bits keeps every
//! nonzero codeword at weight 8 or more. The shipped table freezes every index
//! of popcount two or less plus indices 7 and 11.

use crate::cs::error::{Error, Result};
use bitvec::prelude::*;
use std::fmt::{Display, Formatter};

/// Codeword length (N)
pub const CODE_LENGTH: usize = 64;

/// Information length (K): payload plus CRC
pub const INFO_LENGTH: usize = 40;

/// Number of frozen positions (N - K)
pub const FROZEN_LENGTH: usize = CODE_LENGTH - INFO_LENGTH;

/// Smallest information row weight that keeps dmin >= 8
pub const MIN_ROW_WEIGHT: u32 = 8;

/// Information positions, in the order payload and CRC bits are placed
pub const INFO_POS: [u8; INFO_LENGTH] = [
    13, 14, 15, 19, 21, 22, 23, 25, 26, 27, 28, 29, 30, 31, 35, 37, 38, 39, 41, 42, 43, 44, 45,
    46, 47, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63,
];

/// Frozen positions, always zero before the transform
pub const FROZEN_POS: [u8; FROZEN_LENGTH] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 16, 17, 18, 20, 24, 32, 33, 34, 36, 40, 48,
];

/// Weight of transform row `index`
#[inline]
pub const fn row_weight(index: u8) -> u32 {
    1 << index.count_ones()
}

/// Partition of the 64 positions into information and frozen sets.
///
/// A table is plain data until it is handed to
/// [`PolarCode::with_table`](super::PolarCode::with_table), which refuses any
/// table for which [`check`](Self::check) fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTable {
    info: [u8; INFO_LENGTH],
    frozen: [u8; FROZEN_LENGTH],
}

impl PositionTable {
    /// The table used by [`PolarCode::new`](super::PolarCode::new)
    pub const fn standard() -> Self {
        Self {
            info: INFO_POS,
            frozen: FROZEN_POS,
        }
    }

    /// Build a table from explicit position lists.
    ///
    /// Only the shape is checked here (set sizes and index range); the code
    /// invariants are left to [`check`](Self::check).
    pub fn from_positions(info: &[usize], frozen: &[usize]) -> Result<Self> {
        if info.len() != INFO_LENGTH {
            return Err(Error::invalid_table(format!(
                "expected {} information positions, got {}",
                INFO_LENGTH,
                info.len()
            )));
        }
        if frozen.len() != FROZEN_LENGTH {
            return Err(Error::invalid_table(format!(
                "expected {} frozen positions, got {}",
                FROZEN_LENGTH,
                frozen.len()
            )));
        }
        if let Some(&bad) = info.iter().chain(frozen).find(|&&i| i >= CODE_LENGTH) {
            return Err(Error::invalid_table(format!(
                "position {} is outside 0..{}",
                bad, CODE_LENGTH
            )));
        }

        let mut table = Self::standard();
        for (slot, &index) in table.info.iter_mut().zip(info) {
            *slot = index as u8;
        }
        for (slot, &index) in table.frozen.iter_mut().zip(frozen) {
            *slot = index as u8;
        }
        Ok(table)
    }

    /// Information positions in placement order
    pub fn info(&self) -> &[u8; INFO_LENGTH] {
        &self.info
    }

    /// Frozen positions
    pub fn frozen(&self) -> &[u8; FROZEN_LENGTH] {
        &self.frozen
    }

    /// Bitmask with one bit set per frozen position
    pub fn frozen_mask(&self) -> u64 {
        self.frozen.iter().fold(0, |mask, &i| mask | 1 << i)
    }

    /// Minimum `2^popcount(index)` over the information positions
    pub fn min_info_row_weight(&self) -> u32 {
        self.info
            .iter()
            .map(|&i| row_weight(i))
            .min()
            .unwrap_or(0)
    }

    /// Verify the table, naming the first violated invariant.
    pub fn check(&self) -> Result<()> {
        let mut seen = bitarr![u64, Lsb0; 0; CODE_LENGTH];

        for &index in self.info.iter().chain(&self.frozen) {
            if index as usize >= CODE_LENGTH {
                return Err(Error::invalid_table(format!(
                    "position {} is outside 0..{}",
                    index, CODE_LENGTH
                )));
            }
        }

        for &index in &self.info {
            if seen.replace(index as usize, true) {
                return Err(Error::invalid_table(format!(
                    "information position {} listed twice",
                    index
                )));
            }
        }

        for &index in &self.frozen {
            if seen.replace(index as usize, true) {
                let reason = if self.info.contains(&index) {
                    format!("position {} is both information and frozen", index)
                } else {
                    format!("frozen position {} listed twice", index)
                };
                return Err(Error::invalid_table(reason));
            }
        }

        if let Some(missing) = seen.first_zero() {
            return Err(Error::invalid_table(format!(
                "position {} is neither information nor frozen",
                missing
            )));
        }

        if let Some(&weak) = self.info.iter().find(|&&i| row_weight(i) < MIN_ROW_WEIGHT) {
            return Err(Error::invalid_table(format!(
                "information position {} has row weight {} (< {})",
                weak,
                row_weight(weak),
                MIN_ROW_WEIGHT
            )));
        }

        Ok(())
    }

    /// True only if every table invariant holds
    pub fn check_tables(&self) -> bool {
        self.check().is_ok()
    }
}

impl Default for PositionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl Display for PositionTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} info / {} frozen, min row weight {}",
            INFO_LENGTH,
            FROZEN_LENGTH,
            self.min_info_row_weight()
        )
    }
}
