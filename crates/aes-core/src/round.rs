//! AES round transformations.
//!
//! The state is column-major, so row `r` of column `c` lives at `4 * c + r`.

use crate::block::{xor_in_place, Block};
use crate::gf::{inv_sbox, mul2, sbox};

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Performs ShiftRows in place: row `r` rotates left by `r` columns.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let src = *state;
    for col in 0..4 {
        for row in 1..4 {
            state[4 * col + row] = src[4 * ((col + row) % 4) + row];
        }
    }
}

/// Performs the inverse of ShiftRows in place: row `r` rotates right by `r`.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    let src = *state;
    for col in 0..4 {
        for row in 1..4 {
            state[4 * ((col + row) % 4) + row] = src[4 * col + row];
        }
    }
}

fn mix_single_column(col: &mut [u8; 4]) {
    let [c0, c1, c2, c3] = *col;
    let t = c0 ^ c1 ^ c2 ^ c3;
    col[0] = t ^ c0 ^ mul2(c0 ^ c1);
    col[1] = t ^ c1 ^ mul2(c1 ^ c2);
    col[2] = t ^ c2 ^ mul2(c2 ^ c3);
    col[3] = t ^ c3 ^ mul2(c3 ^ c0);
}

// InvMixColumns = MixColumns followed by the {04}x^2 + {05} correction,
// which only needs doubled XORs of opposite bytes.
fn inv_mix_single_column(col: &mut [u8; 4]) {
    let [c0, c1, c2, c3] = *col;
    let u = mul2(mul2(c0 ^ c2));
    let v = mul2(mul2(c1 ^ c3));
    let t = mul2(u ^ v);
    mix_single_column(col);
    col[0] ^= t ^ u;
    col[1] ^= t ^ v;
    col[2] ^= t ^ u;
    col[3] ^= t ^ v;
}

fn for_each_column(state: &mut Block, f: fn(&mut [u8; 4])) {
    for chunk in state.chunks_exact_mut(4) {
        let mut column = [chunk[0], chunk[1], chunk[2], chunk[3]];
        f(&mut column);
        chunk.copy_from_slice(&column);
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for_each_column(state, mix_single_column);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    for_each_column(state, inv_mix_single_column);
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}
