//! Error types shared by the codec and its scheduling wrapper.

use thiserror::Error;

/// Errors produced by this crate.
///
/// Decode rejection is not an error: it is reported as
/// [`DecodeResult::Rejected`](crate::DecodeResult::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A parameter was outside its accepted range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A value does not fit in the field it is written to.
    #[error("input too large: {length} exceeds maximum of {max_length}")]
    InputTooLarge { length: usize, max_length: usize },

    /// The information/frozen position table violates a code invariant.
    /// A codec is never constructed from such a table.
    #[error("invalid position table: {0}")]
    InvalidTable(String),

    /// A request arrived while the unit was still processing another one.
    #[error("codec is busy")]
    Busy,
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn invalid_table(msg: impl Into<String>) -> Self {
        Error::InvalidTable(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
