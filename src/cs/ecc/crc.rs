//! CRC (Cyclic Redundancy Check) implementation.
//!
//! The polar codec protects its 24-bit payload with the CCITT polynomial
//! `x^16 + x^12 + x^5 + 1` (0x1021), zero initial value, no reflection and no
//! final XOR. That parameter set is known as CRC-16/XMODEM.
//!
//! # How CRCs Work
//!
//! CRC calculations treat data as a binary polynomial and perform modulo-2 division
//! by a generator polynomial, using the remainder as the checksum. The specific
//! polynomial used determines the error detection properties of the CRC.
//!
//! # Examples
//!
//! ```
//! use polar64::ecc::crc::{crc16, Crc16};
//!
//! assert_eq!(Crc16::XMODEM.calculate(b"123456789"), 0x31C3);
//! assert_eq!(crc16(0x000000), 0x0000);
//! ```

use std::fmt::{Display, Formatter};

/// CCITT generator polynomial (implicit x^16 term)
pub const CCITT_POLYNOMIAL: u16 = 0x1021;

/// Non-reflected, table-driven CRC-16
#[derive(Debug, Clone)]
pub struct Crc16 {
    /// Name of the CRC algorithm
    name: &'static str,
    /// Generator polynomial
    polynomial: u16,
    /// Initial value for CRC calculation
    initial_value: u16,
    /// Value to XOR with the final CRC value
    final_xor_value: u16,
    /// Lookup table for faster CRC calculation
    table: [u16; 256],
}

impl Crc16 {
    /// CRC-16 over the CCITT polynomial with zero init and no final XOR
    pub const XMODEM: Crc16 = Crc16::new("CRC-16-XMODEM", CCITT_POLYNOMIAL, 0x0000, 0x0000);

    /// Create a new CRC-16 with custom parameters
    pub const fn new(
        name: &'static str,
        polynomial: u16,
        initial_value: u16,
        final_xor_value: u16,
    ) -> Self {
        Self {
            name,
            polynomial,
            initial_value,
            final_xor_value,
            table: Self::generate_table(polynomial),
        }
    }

    /// Generate lookup table for MSB-first processing
    const fn generate_table(polynomial: u16) -> [u16; 256] {
        let mut table = [0u16; 256];
        let mut i = 0;
        while i < 256 {
            let mut crc = (i as u16) << 8;
            let mut bit = 0;
            while bit < 8 {
                crc = if crc & 0x8000 != 0 {
                    (crc << 1) ^ polynomial
                } else {
                    crc << 1
                };
                bit += 1;
            }
            table[i] = crc;
            i += 1;
        }
        table
    }

    /// Calculate the CRC of a byte slice, most significant bit first
    pub fn calculate(&self, data: &[u8]) -> u16 {
        let crc = data.iter().fold(self.initial_value, |crc, &byte| {
            let index = ((crc >> 8) ^ byte as u16) & 0xFF;
            (crc << 8) ^ self.table[index as usize]
        });
        crc ^ self.final_xor_value
    }

    /// Calculate the CRC of the low 24 bits of `payload`, most significant first
    pub fn calculate_payload(&self, payload: u32) -> u16 {
        let bytes = payload.to_be_bytes();
        self.calculate(&bytes[1..])
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn polynomial(&self) -> u16 {
        self.polynomial
    }

    /// Verify a payload against a received checksum
    pub fn verify_payload(&self, payload: u32, expected_crc: u16) -> bool {
        self.calculate_payload(payload) == expected_crc
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::XMODEM
    }
}

impl Display for Crc16 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (polynomial: 0x{:04X})", self.name, self.polynomial)
    }
}

static PAYLOAD_CRC: Crc16 = Crc16::XMODEM;

/// CRC-16 of a 24-bit payload. Bits above bit 23 are ignored.
#[inline]
pub fn crc16(payload: u32) -> u16 {
    PAYLOAD_CRC.calculate_payload(payload)
}
