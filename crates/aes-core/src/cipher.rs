//! AES-128 key schedule and block encryption/decryption.

use crate::block::Block;
use crate::gf::sbox;
use crate::key::{Aes128Key, RoundKeys, ROUNDS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};

const RCON: [u8; ROUNDS] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80, 0x1b, 0x36];

/// RotWord, SubWord and the round constant applied to the last word of the
/// previous round key.
fn schedule_core(last: [u8; 4], rcon: u8) -> [u8; 4] {
    let [b0, b1, b2, b3] = last;
    [sbox(b1) ^ rcon, sbox(b2), sbox(b3), sbox(b0)]
}

/// Expands a 128-bit key into 11 round keys.
pub fn expand_key(key: &Aes128Key) -> RoundKeys {
    let mut round_keys = [[0u8; 16]; ROUNDS + 1];
    round_keys[0] = key.0;

    for round in 1..=ROUNDS {
        let prev = round_keys[round - 1];
        let next = &mut round_keys[round];

        let temp = schedule_core([prev[12], prev[13], prev[14], prev[15]], RCON[round - 1]);
        for i in 0..4 {
            next[i] = temp[i] ^ prev[i];
        }
        for i in 4..16 {
            next[i] = next[i - 4] ^ prev[i];
        }
    }

    RoundKeys(round_keys)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(round_keys: &RoundKeys, block: &Block) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));

    for round in 1..ROUNDS {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }

    // The final round has no MixColumns.
    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(ROUNDS));

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(round_keys: &RoundKeys, block: &Block) -> Block {
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(ROUNDS));
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);

    for round in (1..ROUNDS).rev() {
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
    }

    add_round_key(&mut state, round_keys.get(0));

    state
}

/// AES-128 cipher holding an expanded key schedule.
///
/// The schedule is computed once in [`Aes128::new`] and reused for every block.
#[derive(Clone, Debug)]
pub struct Aes128 {
    round_keys: RoundKeys,
}

impl Aes128 {
    /// Expands `key` and returns a cipher ready to process blocks.
    pub fn new(key: &Aes128Key) -> Self {
        Self {
            round_keys: expand_key(key),
        }
    }

    /// Returns the expanded round keys.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.round_keys
    }

    /// Encrypts one block.
    #[inline]
    pub fn encrypt_block(&self, block: &Block) -> Block {
        encrypt_block(&self.round_keys, block)
    }

    /// Decrypts one block.
    #[inline]
    pub fn decrypt_block(&self, block: &Block) -> Block {
        decrypt_block(&self.round_keys, block)
    }
}

impl From<RoundKeys> for Aes128 {
    fn from(round_keys: RoundKeys) -> Self {
        Self { round_keys }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Aes128Key;
    use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
    use rand::{Rng, RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    // FIPS-197 appendix A.1.
    const EXPANSION_KEY: [u8; 16] = [
        0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f,
        0x3c,
    ];
    const EXPANSION_ROUND1: [u8; 16] = [
        0xa0, 0xfa, 0xfe, 0x17, 0x88, 0x54, 0x2c, 0xb1, 0x23, 0xa3, 0x39, 0x39, 0x2a, 0x6c, 0x76,
        0x05,
    ];
    const EXPANSION_ROUND10: [u8; 16] = [
        0xd0, 0x14, 0xf9, 0xa8, 0xc9, 0xee, 0x25, 0x89, 0xe1, 0x3f, 0x0c, 0xc8, 0xb6, 0x63, 0x0c,
        0xa6,
    ];

    fn hamming_distance(a: &Block, b: &Block) -> u32 {
        a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum()
    }

    #[test]
    fn encrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let round_keys = expand_key(&key);
        let ct = encrypt_block(&round_keys, &NIST_PLAIN);
        assert_eq!(ct, NIST_CIPHER);
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let round_keys = expand_key(&key);
        let pt = decrypt_block(&round_keys, &NIST_CIPHER);
        assert_eq!(pt, NIST_PLAIN);
    }

    #[test]
    fn key_expansion_matches_fips_appendix() {
        let rks = expand_key(&Aes128Key::from(EXPANSION_KEY));
        assert_eq!(rks.get(0), &EXPANSION_KEY);
        assert_eq!(rks.get(1), &EXPANSION_ROUND1);
        assert_eq!(rks.get(10), &EXPANSION_ROUND10);
    }

    #[test]
    fn key_expansion_is_deterministic() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        for _ in 0..16 {
            let key = Aes128Key::from(rng.gen::<[u8; 16]>());
            let first = expand_key(&key);
            let second = expand_key(&key);
            assert_eq!(first, second);
            assert_eq!(first.get(0), &key.0);
            assert_eq!(first.to_bytes().len(), 176);
        }
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let key = Aes128Key::from(key_bytes);
            let rks = expand_key(&key);
            let ct = encrypt_block(&rks, &block);
            let pt = decrypt_block(&rks, &ct);
            assert_eq!(pt, block);
        }
    }

    #[test]
    fn matches_reference_implementation() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        for _ in 0..64 {
            let key_bytes: [u8; 16] = rng.gen();
            let block: [u8; 16] = rng.gen();
            let reference = aes::Aes128::new(&key_bytes.into());

            let mut expected = block.into();
            reference.encrypt_block(&mut expected);
            let expected: [u8; 16] = expected.into();

            let cipher = Aes128::new(&Aes128Key::from(key_bytes));
            let ct = cipher.encrypt_block(&block);
            assert_eq!(ct, expected);

            let mut back = ct.into();
            reference.decrypt_block(&mut back);
            let back: [u8; 16] = back.into();
            assert_eq!(cipher.decrypt_block(&ct), back);
        }
    }

    #[test]
    fn wrong_key_does_not_recover_plaintext() {
        let rks = expand_key(&Aes128Key::from(NIST_KEY));
        let mut other = NIST_KEY;
        other[15] ^= 1;
        let other_rks = expand_key(&Aes128Key::from(other));
        let ct = encrypt_block(&rks, &NIST_PLAIN);
        assert_ne!(decrypt_block(&other_rks, &ct), NIST_PLAIN);
    }

    #[test]
    fn single_bit_flips_avalanche() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let trials = 200u32;
        let mut plaintext_total = 0u32;
        let mut key_total = 0u32;
        for _ in 0..trials {
            let key_bytes: [u8; 16] = rng.gen();
            let block: [u8; 16] = rng.gen();
            let bit = rng.gen_range(0..128usize);
            let rks = expand_key(&Aes128Key::from(key_bytes));
            let ct = encrypt_block(&rks, &block);

            let mut flipped = block;
            flipped[bit / 8] ^= 1 << (bit % 8);
            plaintext_total += hamming_distance(&ct, &encrypt_block(&rks, &flipped));

            let mut flipped_key = key_bytes;
            flipped_key[bit / 8] ^= 1 << (bit % 8);
            let other = expand_key(&Aes128Key::from(flipped_key));
            key_total += hamming_distance(&ct, &encrypt_block(&other, &block));
        }
        for total in [plaintext_total, key_total] {
            let mean = f64::from(total) / f64::from(trials);
            assert!((56.0..=72.0).contains(&mean), "mean bit flips {mean}");
        }
    }

    #[test]
    fn cipher_handle_reuses_schedule() {
        let cipher = Aes128::new(&Aes128Key::from(NIST_KEY));
        assert_eq!(cipher.encrypt_block(&NIST_PLAIN), NIST_CIPHER);
        assert_eq!(cipher.decrypt_block(&NIST_CIPHER), NIST_PLAIN);

        let rebuilt = Aes128::from(RoundKeys::from_bytes(&cipher.round_keys().to_bytes()));
        assert_eq!(rebuilt.encrypt_block(&NIST_PLAIN), NIST_CIPHER);
    }
}
