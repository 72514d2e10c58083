//! Block representation helpers.

/// AES block of 16 bytes, laid out column-major: byte `i` sits in row `i % 4`,
/// column `i / 4`.
pub type Block = [u8; 16];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
