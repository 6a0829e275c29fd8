//! Error patterns inside a Hamming ball around a 64-bit word.

use super::positions::CODE_LENGTH;
use crate::cs::error::{Error, Result};
use std::iter::FusedIterator;

/// Hamming radius searched by the decoder
pub const DECODE_RADIUS: usize = 3;

/// Number of 64-bit masks of weight `0..=radius`
pub const fn ball_size(radius: usize) -> usize {
    let mut total = 0;
    let mut binomial = 1;
    let mut w = 0;
    while w <= radius && w <= CODE_LENGTH {
        total += binomial;
        binomial = binomial * (CODE_LENGTH - w) / (w + 1);
        w += 1;
    }
    total
}

/// Lazy enumeration of every mask of weight `0..=radius`.
///
/// Masks come out by ascending weight, and within one weight in
/// lexicographic order of their set positions. Cloning a fresh iterator
/// restarts the sequence.
#[derive(Debug, Clone)]
pub struct ErrorPatterns {
    /// Weight of the mask that will be yielded next
    weight: usize,
    /// Set positions of that mask, ascending; only `..weight` is meaningful
    positions: [usize; DECODE_RADIUS],
    remaining: usize,
}

impl ErrorPatterns {
    /// Every mask in the decoder's search ball
    pub fn new() -> Self {
        Self::start(DECODE_RADIUS)
    }

    /// Every mask of weight at most `radius`
    pub fn up_to(radius: usize) -> Result<Self> {
        if radius > DECODE_RADIUS {
            return Err(Error::invalid_input(format!(
                "pattern radius must be at most {}, got {}",
                DECODE_RADIUS, radius
            )));
        }
        Ok(Self::start(radius))
    }

    fn start(radius: usize) -> Self {
        Self {
            weight: 0,
            positions: [0; DECODE_RADIUS],
            remaining: ball_size(radius),
        }
    }

    fn current(&self) -> u64 {
        self.positions[..self.weight]
            .iter()
            .fold(0, |mask, &p| mask | 1 << p)
    }

    /// Step to the next combination, or to the first one of the next weight.
    fn advance(&mut self) {
        let w = self.weight;
        for i in (0..w).rev() {
            if self.positions[i] < CODE_LENGTH - w + i {
                self.positions[i] += 1;
                for j in i + 1..w {
                    self.positions[j] = self.positions[j - 1] + 1;
                }
                return;
            }
        }

        self.weight += 1;
        for (j, slot) in self.positions.iter_mut().take(self.weight).enumerate() {
            *slot = j;
        }
    }
}

impl Default for ErrorPatterns {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for ErrorPatterns {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        let mask = self.current();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(mask)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ErrorPatterns {}

impl FusedIterator for ErrorPatterns {}

/// Nonzero masks of weight `1..=radius` whose lowest set position is `first`.
///
/// Over `first in 0..64` these partition the ball minus the zero mask, which
/// lets a parallel search split the work statically.
pub fn anchored_at(first: usize, radius: usize) -> impl Iterator<Item = u64> {
    let base = 1u64 << first;
    let single_end = if radius >= 1 { 1 } else { 0 };
    let pair_end = if radius >= 2 { CODE_LENGTH } else { first + 1 };
    let triple_end = if radius >= 3 { CODE_LENGTH } else { first + 1 };

    std::iter::repeat(base)
        .take(single_end)
        .chain((first + 1..pair_end).map(move |b| base | 1 << b))
        .chain((first + 1..triple_end).flat_map(move |b| {
            (b + 1..CODE_LENGTH).map(move |c| base | 1 << b | 1 << c)
        }))
}
