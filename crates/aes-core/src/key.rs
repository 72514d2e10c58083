//! Key types for AES-128.

use crate::block::Block;

/// Number of rounds performed by AES-128.
pub const ROUNDS: usize = 10;

/// Size of the flattened key schedule in bytes, `(ROUNDS + 1) * 16`.
pub const SCHEDULE_BYTES: usize = (ROUNDS + 1) * 16;

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; 16]);

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

/// Expanded round keys for AES-128.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundKeys(pub [Block; ROUNDS + 1]);

impl RoundKeys {
    /// Returns the round key at the requested index (0..=10).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Flattens the schedule into its 176-byte wire layout, round key 0 first.
    pub fn to_bytes(&self) -> [u8; SCHEDULE_BYTES] {
        let mut out = [0u8; SCHEDULE_BYTES];
        for (dst, rk) in out.chunks_exact_mut(16).zip(self.0.iter()) {
            dst.copy_from_slice(rk);
        }
        out
    }

    /// Rebuilds a schedule from its 176-byte layout.
    pub fn from_bytes(bytes: &[u8; SCHEDULE_BYTES]) -> Self {
        let mut round_keys = [[0u8; 16]; ROUNDS + 1];
        for (rk, src) in round_keys.iter_mut().zip(bytes.chunks_exact(16)) {
            rk.copy_from_slice(src);
        }
        Self(round_keys)
    }
}

impl From<[u8; SCHEDULE_BYTES]> for RoundKeys {
    fn from(value: [u8; SCHEDULE_BYTES]) -> Self {
        Self::from_bytes(&value)
    }
}
