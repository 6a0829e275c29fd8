//! Polar(64,40) error correction code with a CRC-16 miscorrection guard.
//!
//! Polar codes place information bits on the reliable rows of the Arikan
//! transform `F^{⊗n}` and freeze the rest to zero. This code is fixed at
//! N = 64 and K = 40: a 24-bit payload followed by its 16-bit CRC.
//!
//! Information rows are chosen so every row has weight at least 8, which
//! makes the minimum distance 8. Decoding is a bounded-distance search: every
//! word within Hamming distance 3 of the received word is transformed back,
//! checked against the frozen positions and then against the CRC. The word
//! is accepted only if exactly one candidate passes both checks.
//!
//! This gives:
//! - correction of any pattern of up to 3 bit flips
//! - detection (rejection) of any pattern of exactly 4 bit flips
//! - a fixed worst case of 43,745 candidate checks per block
//!
//! # Examples
//!
//! ```
//! use polar64::{DecodeResult, PolarCode};
//!
//! let code = PolarCode::new().unwrap();
//! let codeword = code.encode(0x555555);
//!
//! let three_flips = codeword ^ (1 << 3) ^ (1 << 29) ^ (1 << 50);
//! assert_eq!(code.decode(three_flips), DecodeResult::Accepted { payload: 0x555555 });
//!
//! let four_flips = three_flips ^ (1 << 61);
//! assert_eq!(code.decode(four_flips), DecodeResult::Rejected);
//! ```

use crate::cs::ecc::crc::crc16;
use crate::cs::ecc::{BlockCode, DecodeResult};
use crate::cs::error::{Error, Result};
use log::{debug, error};
use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

mod patterns;
mod positions;
mod search;
mod transform;


pub use patterns::{anchored_at, ball_size, ErrorPatterns, DECODE_RADIUS};
pub use positions::{
    row_weight, PositionTable, CODE_LENGTH, FROZEN_LENGTH, FROZEN_POS, INFO_LENGTH, INFO_POS,
    MIN_ROW_WEIGHT,
};
pub use search::{DecoderConfig, SearchStats, SearchStrategy};
pub use transform::{polar_transform, STAGES};

/// 24-bit message protected by the code, carried in the low bits
pub type Payload = u32;

/// 64-bit transmitted block; bit `i` is position `i`
pub type Codeword = u64;

/// Payload width in bits
pub const PAYLOAD_BITS: usize = 24;

/// CRC width in bits
pub const CRC_BITS: usize = 16;

/// Largest representable payload
pub const MAX_PAYLOAD: Payload = (1 << PAYLOAD_BITS) - 1;

/// Polar(64,40) codec bound to one validated position table
#[derive(Debug, Clone)]
pub struct PolarCode {
    table: PositionTable,
    frozen_mask: u64,
    config: DecoderConfig,
}

impl PolarCode {
    /// Create a codec over the standard position table
    pub fn new() -> Result<Self> {
        Self::with_table(PositionTable::standard())
    }

    /// Create a codec over a custom position table.
    ///
    /// Fails with [`Error::InvalidTable`] if the table breaks any code
    /// invariant; no codec exists for such a table.
    pub fn with_table(table: PositionTable) -> Result<Self> {
        if let Err(e) = table.check() {
            error!("refusing position table: {}", e);
            return Err(e);
        }

        let frozen_mask = table.frozen_mask();
        debug!("polar code ready: {}", table);
        Ok(Self {
            table,
            frozen_mask,
            config: DecoderConfig::default(),
        })
    }

    /// Process-wide codec over the standard table, validated on first use
    pub fn shared() -> Result<&'static PolarCode> {
        static SHARED: OnceLock<Result<PolarCode>> = OnceLock::new();
        SHARED.get_or_init(PolarCode::new).as_ref().map_err(Clone::clone)
    }

    /// Replace the decoder configuration
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Get the code rate (K/N)
    pub fn rate(&self) -> f64 {
        INFO_LENGTH as f64 / CODE_LENGTH as f64
    }

    /// Encode a payload. Bits above bit 23 are ignored.
    pub fn encode(&self, payload: Payload) -> Codeword {
        let payload = payload & MAX_PAYLOAD;
        let info_word = ((payload as u64) << CRC_BITS) | crc16(payload) as u64;
        polar_transform(self.scatter(info_word))
    }

    /// Encode a payload, rejecting values wider than 24 bits
    pub fn try_encode(&self, payload: Payload) -> Result<Codeword> {
        if payload > MAX_PAYLOAD {
            return Err(Error::InputTooLarge {
                length: payload as usize,
                max_length: MAX_PAYLOAD as usize,
            });
        }
        Ok(self.encode(payload))
    }

    /// Return the payload if `candidate` is exactly a codeword whose CRC
    /// matches its payload.
    pub fn validate(&self, candidate: Codeword) -> Option<Payload> {
        let u_hat = polar_transform(candidate);
        if u_hat & self.frozen_mask != 0 {
            return None;
        }

        let info_word = self.gather(u_hat);
        let payload = (info_word >> CRC_BITS) as Payload;
        let crc_rx = (info_word & 0xFFFF) as u16;
        (crc16(payload) == crc_rx).then_some(payload)
    }

    /// Place a 40-bit information word onto the information positions,
    /// most significant bit on `INFO_POS[0]`.
    fn scatter(&self, info_word: u64) -> u64 {
        self.table
            .info()
            .iter()
            .enumerate()
            .fold(0, |u, (k, &pos)| {
                u | (((info_word >> (INFO_LENGTH - 1 - k)) & 1) << pos)
            })
    }

    /// Inverse of [`scatter`](Self::scatter).
    fn gather(&self, u: u64) -> u64 {
        self.table
            .info()
            .iter()
            .fold(0, |word, &pos| (word << 1) | ((u >> pos) & 1))
    }
}

impl BlockCode for PolarCode {
    type Message = Payload;
    type Block = Codeword;

    fn encode(&self, message: Payload) -> Codeword {
        PolarCode::encode(self, message)
    }

    fn decode(&self, block: Codeword) -> DecodeResult<Payload> {
        PolarCode::decode(self, block)
    }
}

impl Display for PolarCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Polar({},{}) rate={:.3} radius={} search={:?}",
            CODE_LENGTH,
            INFO_LENGTH,
            self.rate(),
            DECODE_RADIUS,
            self.config.strategy
        )
    }
}
