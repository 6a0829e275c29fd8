pub mod ecc;
pub mod error;
