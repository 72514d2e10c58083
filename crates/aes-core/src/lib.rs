//! Portable AES-128 implementation.
//!
//! This crate follows FIPS-197 and provides:
//! - Key schedule for AES-128.
//! - Single-block encryption and decryption.
//! - The GF(2^8) doubling primitive and S-box tables the rounds are built on.
//!
//! Everything operates on fixed-size arrays; there is no heap allocation and
//! no runtime error path. [`gf::mul2`] is branchless, but the S-box is a plain
//! table lookup, so the implementation should not be treated as side-channel
//! hardened. Modes of operation and padding are left to callers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
pub mod gf;
mod key;
mod round;
mod sbox;

pub use crate::block::Block;
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key, Aes128};
pub use crate::key::{Aes128Key, RoundKeys, ROUNDS, SCHEDULE_BYTES};
