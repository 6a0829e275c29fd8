pub mod cs;

pub use cs::ecc;
pub use cs::ecc::polar::{Codeword, DecoderConfig, Payload, PolarCode, PositionTable, SearchStrategy};
pub use cs::ecc::{BlockCode, DecodeResult, ScheduleConfig, ScheduledCodec};
pub use cs::error::{Error, Result};
