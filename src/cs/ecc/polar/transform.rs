//! The length-64 polar transform `x = u·F^{⊗6}` over GF(2).
//!
//! Each of the six butterfly stages XORs the upper half of every block into
//! its lower half. `F·F = I` over GF(2) and the stages act on independent
//! index bits, so applying the transform twice is the identity; the decoder
//! relies on this to invert a codeword with the same function.

/// Number of butterfly stages (log2 of the code length)
pub const STAGES: usize = 6;

/// Positions that receive the XOR at each stage (bit `s` of the index clear)
const STAGE_MASKS: [u64; STAGES] = [
    0x5555_5555_5555_5555,
    0x3333_3333_3333_3333,
    0x0F0F_0F0F_0F0F_0F0F,
    0x00FF_00FF_00FF_00FF,
    0x0000_FFFF_0000_FFFF,
    0x0000_0000_FFFF_FFFF,
];

/// Apply the polar transform. Self-inverse.
#[inline]
pub const fn polar_transform(v: u64) -> u64 {
    let mut v = v;
    let mut stage = 0;
    while stage < STAGES {
        let half = 1 << stage;
        v ^= (v >> half) & STAGE_MASKS[stage];
        stage += 1;
    }
    v
}
