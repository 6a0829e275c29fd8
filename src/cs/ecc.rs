//! Error correction code implementations.
//!
//! This module provides:
//! - A CRC-16 engine used as an integrity guard
//! - A Polar(64,40) block code with a bounded-distance decoder
//! - A step-driven scheduling wrapper for any [`BlockCode`]
//!
//! # Error Correction Algorithms
//!
//! Error correction codes are used to detect and correct errors in data
//! transmission and storage, making digital communications more reliable.
//!
//! # Examples
//!
//! ```rust
//! use polar64::ecc::{BlockCode, DecodeResult};
//! use polar64::PolarCode;
//!
//! let code = PolarCode::new().unwrap();
//! let codeword = code.encode(0x00C0FFEE);
//! let damaged = codeword ^ (1 << 5) ^ (1 << 40);
//! assert_eq!(code.decode(damaged), DecodeResult::Accepted { payload: 0x00C0FFEE });
//! ```

use std::fmt::Debug;

pub use crate::cs::error::Result;

/// Outcome of decoding one received block.
///
/// `Rejected` carries nothing: callers cannot tell a structurally invalid
/// word from a CRC failure or an ambiguous search, and must not try to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeResult<M> {
    /// Exactly one valid codeword was found within the search radius.
    Accepted { payload: M },
    /// No valid codeword, or more than one, was found.
    Rejected,
}

impl<M: Copy> DecodeResult<M> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DecodeResult::Accepted { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, DecodeResult::Rejected)
    }

    /// The recovered payload, if the block was accepted.
    pub fn payload(&self) -> Option<M> {
        match *self {
            DecodeResult::Accepted { payload } => Some(payload),
            DecodeResult::Rejected => None,
        }
    }
}

impl<M> From<DecodeResult<M>> for Option<M> {
    fn from(result: DecodeResult<M>) -> Self {
        match result {
            DecodeResult::Accepted { payload } => Some(payload),
            DecodeResult::Rejected => None,
        }
    }
}

/// Trait for fixed-size block code implementations
pub trait BlockCode {
    /// Unprotected unit handed to the encoder
    type Message: Copy + Debug;
    /// Protected unit produced by the encoder
    type Block: Copy + Debug;

    /// Encode one message into one block. Must be total.
    fn encode(&self, message: Self::Message) -> Self::Block;

    /// Decode one (possibly corrupted) block. Must be total.
    fn decode(&self, block: Self::Block) -> DecodeResult<Self::Message>;
}

/// CRC engines used as integrity guards
pub mod crc;
pub use crc::{crc16, Crc16};

/// Polar(64,40) code with CRC-guarded bounded-distance decoding
pub mod polar;
pub use polar::{PolarCode, PositionTable};

/// Step-driven request/response wrapper for block codes
pub mod schedule;
pub use schedule::{Request, Response, ScheduleConfig, ScheduledCodec};
