//! Bounded-distance search over the radius-3 Hamming ball.
//!
//! Every mask of weight 0 to 3 is applied to the received word and the
//! result handed to the candidate validator. The word is accepted only when
//! exactly one mask validates; an empty or ambiguous search is rejected.

use super::patterns::{anchored_at, ErrorPatterns, DECODE_RADIUS};
use super::positions::CODE_LENGTH;
use super::{Codeword, Payload, PolarCode};
use crate::cs::ecc::DecodeResult;
use log::trace;
use rayon::prelude::*;

/// How the candidate masks are walked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// One thread, masks in ascending weight order
    #[default]
    Sequential,
    /// Masks split by lowest flipped position across the rayon pool
    Parallel,
}

/// Decoder tuning. Neither option changes any decode outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Search strategy
    pub strategy: SearchStrategy,
    /// Stop searching once a second valid candidate is found
    pub stop_on_ambiguity: bool,
}

impl DecoderConfig {
    /// Sequential search that stops on ambiguity.
    pub fn new() -> Self {
        Self {
            strategy: SearchStrategy::Sequential,
            stop_on_ambiguity: true,
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_stop_on_ambiguity(mut self, stop: bool) -> Self {
        self.stop_on_ambiguity = stop;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostics from one decode call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Candidates handed to the validator. Depends on the strategy when the
    /// search stops early.
    pub candidates: usize,
    /// Candidates that validated
    pub hits: usize,
}

/// Running tally: hit count and the most recent hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    examined: usize,
    hits: usize,
    last: Option<Payload>,
}

impl Tally {
    fn record(mut self, hit: Option<Payload>) -> Self {
        self.examined += 1;
        if hit.is_some() {
            self.hits += 1;
            self.last = hit;
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            examined: self.examined + other.examined,
            hits: self.hits + other.hits,
            last: other.last.or(self.last),
        }
    }

    fn is_ambiguous(&self) -> bool {
        self.hits > 1
    }

    fn decision(&self) -> DecodeResult<Payload> {
        match (self.hits, self.last) {
            (1, Some(payload)) => DecodeResult::Accepted { payload },
            _ => DecodeResult::Rejected,
        }
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            candidates: self.examined,
            hits: self.hits,
        }
    }
}

impl PolarCode {
    /// Decode a received word, correcting up to three flipped bits.
    pub fn decode(&self, received: Codeword) -> DecodeResult<Payload> {
        self.decode_with_stats(received).0
    }

    /// Decode and report how much of the ball was searched.
    pub fn decode_with_stats(&self, received: Codeword) -> (DecodeResult<Payload>, SearchStats) {
        let tally = match self.config().strategy {
            SearchStrategy::Sequential => self.search_sequential(received),
            SearchStrategy::Parallel => self.search_parallel(received),
        };

        let result = tally.decision();
        if result.is_rejected() {
            trace!(
                "rejected {:#018x}: {} hits in {} candidates",
                received,
                tally.hits,
                tally.examined
            );
        }
        (result, tally.stats())
    }

    fn search_sequential(&self, received: Codeword) -> Tally {
        let stop = self.config().stop_on_ambiguity;
        let mut tally = Tally::default();
        for mask in ErrorPatterns::new() {
            tally = tally.record(self.validate(received ^ mask));
            if stop && tally.is_ambiguous() {
                break;
            }
        }
        tally
    }

    fn search_parallel(&self, received: Codeword) -> Tally {
        let stop = self.config().stop_on_ambiguity;
        let origin = Tally::default().record(self.validate(received));

        (0..CODE_LENGTH)
            .into_par_iter()
            .map(|first| {
                let mut tally = Tally::default();
                for mask in anchored_at(first, DECODE_RADIUS) {
                    tally = tally.record(self.validate(received ^ mask));
                    if stop && tally.is_ambiguous() {
                        break;
                    }
                }
                tally
            })
            .reduce(Tally::default, Tally::merge)
            .merge(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_with(strategy: SearchStrategy, stop: bool) -> PolarCode {
        PolarCode::new().unwrap().with_config(
            DecoderConfig::new()
                .with_strategy(strategy)
                .with_stop_on_ambiguity(stop),
        )
    }

    #[test]
    fn test_tally_decision() {
        let empty = Tally::default();
        assert_eq!(empty.decision(), DecodeResult::Rejected);

        let one = empty.record(None).record(Some(0x123456)).record(None);
        assert_eq!(one.decision(), DecodeResult::Accepted { payload: 0x123456 });
        assert_eq!(one.stats(), SearchStats { candidates: 3, hits: 1 });

        let two = one.record(Some(0x654321));
        assert!(two.is_ambiguous());
        assert_eq!(two.decision(), DecodeResult::Rejected);
    }

    #[test]
    fn test_tally_merge_uses_total_count() {
        let left = Tally::default().record(Some(1));
        let right = Tally::default().record(Some(2));
        assert_eq!(left.decision(), DecodeResult::Accepted { payload: 1 });
        assert_eq!(right.decision(), DecodeResult::Accepted { payload: 2 });
        assert_eq!(left.merge(right).decision(), DecodeResult::Rejected);

        let quiet = Tally::default().record(None).record(None);
        let merged = quiet.merge(right);
        assert_eq!(merged.decision(), DecodeResult::Accepted { payload: 2 });
        assert_eq!(merged.examined, 3);
    }

    #[test]
    fn test_full_search_examines_whole_ball() {
        let code = code_with(SearchStrategy::Sequential, false);
        let (result, stats) = code.decode_with_stats(code.encode(0x0F0F0F));
        assert_eq!(result, DecodeResult::Accepted { payload: 0x0F0F0F });
        assert_eq!(stats, SearchStats { candidates: 43_745, hits: 1 });

        let code = code_with(SearchStrategy::Parallel, false);
        let (_, stats) = code.decode_with_stats(code.encode(0x0F0F0F) ^ 0b1011);
        assert_eq!(stats, SearchStats { candidates: 43_745, hits: 1 });
    }

    #[test]
    fn test_strategies_agree() {
        let sequential = code_with(SearchStrategy::Sequential, true);
        let parallel = code_with(SearchStrategy::Parallel, true);
        let codeword = sequential.encode(0x5A5A5A);

        let masks = [
            0u64,
            1 << 17,
            (1 << 2) | (1 << 40),
            (1 << 0) | (1 << 31) | (1 << 63),
            0b1111,
            (1 << 5) | (1 << 19) | (1 << 44) | (1 << 60),
            u64::MAX,
        ];
        for mask in masks {
            let word = codeword ^ mask;
            assert_eq!(
                sequential.decode(word),
                parallel.decode(word),
                "mask {mask:#x}"
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = DecoderConfig::default();
        assert_eq!(config.strategy, SearchStrategy::Sequential);
        assert!(config.stop_on_ambiguity);
    }
}
