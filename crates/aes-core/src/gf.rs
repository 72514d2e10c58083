//! Arithmetic in GF(2^8) with the AES reduction polynomial
//! `x^8 + x^4 + x^3 + x + 1` (0x11B).
//!
//! Only [`mul2`] is used by the round functions; every other MixColumns
//! coefficient is built by composing it with XOR. [`mul`] is kept for callers
//! that need arbitrary products.

pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, SBOX};

/// Low byte of the reduction polynomial.
const REDUCTION: u8 = 0x1b;

/// Multiplies `a` by `x` (i.e. by 2).
///
/// The reduction is selected with a mask derived from the high bit, so the
/// function has no data-dependent branch.
#[inline]
pub fn mul2(a: u8) -> u8 {
    let mask = (a >> 7).wrapping_neg();
    (a << 1) ^ (REDUCTION & mask)
}

/// Multiplies two field elements.
pub fn mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    for _ in 0..8 {
        product ^= a & (b & 1).wrapping_neg();
        a = mul2(a);
        b >>= 1;
    }
    product
}
