//! Command-line interface for the `aes-core` AES-128 implementation.

#![forbid(unsafe_code)]

mod logger;

use aes_core::{decrypt_block, encrypt_block, expand_key, Aes128Key, Block, RoundKeys};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, metadata::LevelFilter};

/// FIPS-197 appendix C.1 known-answer vector.
const KAT_KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f";
const KAT_PLAIN_HEX: &str = "00112233445566778899aabbccddeeff";
const KAT_CIPHER_HEX: &str = "69c4e0d86a7b0430d8cdb78070b4c55a";

/// AES-128 single-block CLI.
#[derive(Parser)]
#[command(name = "aes128", version, author, about = "AES-128 single-block tool")]
struct Cli {
    /// Default log level; `RUST_LOG` overrides it.
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the 11 round keys derived from a key.
    Expand {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
    },
    /// Encrypt one 16-byte block.
    Enc {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Decrypt one 16-byte block.
    Dec {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Ciphertext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Run the FIPS-197 known-answer test and random round trips.
    Check {
        /// Number of random round trips after the known-answer test.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key and block, encrypt, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.log_level);
    match cli.command {
        Commands::Expand { key_hex } => cmd_expand(&key_hex),
        Commands::Enc { key_hex, block_hex } => cmd_enc(&key_hex, &block_hex),
        Commands::Dec { key_hex, block_hex } => cmd_dec(&key_hex, &block_hex),
        Commands::Check { samples, seed } => cmd_check(samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_expand(key_hex: &str) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    for line in round_key_lines(&expand_key(&key)) {
        println!("{line}");
    }
    Ok(())
}

fn cmd_enc(key_hex: &str, block_hex: &str) -> Result<()> {
    let round_keys = expand_key(&parse_key_hex(key_hex)?);
    let block = parse_block_hex(block_hex).context("parse plaintext block")?;
    let ct = encrypt_block(&round_keys, &block);
    debug!(plaintext = %hex::encode(block), "encrypted block");
    println!("{}", hex::encode(ct));
    Ok(())
}

fn cmd_dec(key_hex: &str, block_hex: &str) -> Result<()> {
    let round_keys = expand_key(&parse_key_hex(key_hex)?);
    let block = parse_block_hex(block_hex).context("parse ciphertext block")?;
    let pt = decrypt_block(&round_keys, &block);
    debug!(ciphertext = %hex::encode(block), "decrypted block");
    println!("{}", hex::encode(pt));
    Ok(())
}

fn cmd_check(samples: usize, seed: Option<u64>) -> Result<()> {
    known_answer_test()?;
    info!("known-answer test passed");

    let mut rng = seeded_rng(seed);
    round_trips(&mut rng, samples)?;
    info!(samples, "random round trips passed");

    println!("ok");
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; 16];
    rng.fill_bytes(&mut key_bytes);
    let round_keys = expand_key(&Aes128Key::from(key_bytes));

    let mut block = [0u8; 16];
    rng.fill_bytes(&mut block);
    let ct = encrypt_block(&round_keys, &block);
    let decrypted = decrypt_block(&round_keys, &ct);

    println!("demo key: {}", hex::encode(key_bytes));
    println!("plaintext: {}", hex::encode(block));
    println!("ciphertext: {}", hex::encode(ct));
    println!("decrypted: {}", hex::encode(decrypted));
    if decrypted != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn known_answer_test() -> Result<()> {
    let round_keys = expand_key(&parse_key_hex(KAT_KEY_HEX)?);
    let plain = parse_block_hex(KAT_PLAIN_HEX)?;
    let expected = parse_block_hex(KAT_CIPHER_HEX)?;

    let ct = encrypt_block(&round_keys, &plain);
    if ct != expected {
        bail!(
            "known-answer encryption mismatch: got {}, expected {}",
            hex::encode(ct),
            KAT_CIPHER_HEX
        );
    }
    let pt = decrypt_block(&round_keys, &ct);
    if pt != plain {
        bail!(
            "known-answer decryption mismatch: got {}, expected {}",
            hex::encode(pt),
            KAT_PLAIN_HEX
        );
    }
    Ok(())
}

fn round_trips(rng: &mut impl RngCore, samples: usize) -> Result<()> {
    for sample in 0..samples {
        let mut key_bytes = [0u8; 16];
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut key_bytes);
        rng.fill_bytes(&mut block);
        let round_keys = expand_key(&Aes128Key::from(key_bytes));
        let pt = decrypt_block(&round_keys, &encrypt_block(&round_keys, &block));
        if pt != block {
            bail!(
                "round trip {sample} failed for key {} block {}",
                hex::encode(key_bytes),
                hex::encode(block)
            );
        }
    }
    Ok(())
}

fn round_key_lines(round_keys: &RoundKeys) -> Vec<String> {
    round_keys
        .0
        .iter()
        .enumerate()
        .map(|(round, rk)| format!("{round:2}: {}", hex::encode(rk)))
        .collect()
}

fn parse_hex16(hex_str: &str) -> Result<[u8; 16]> {
    let bytes = hex::decode(hex_str.trim()).context("decode hex")?;
    if bytes.len() != 16 {
        bail!(
            "expected 16 bytes (32 hex characters), got {} bytes",
            bytes.len()
        );
    }
    let mut out = [0u8; 16];
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn parse_key_hex(hex_str: &str) -> Result<Aes128Key> {
    parse_hex16(hex_str)
        .map(Aes128Key::from)
        .context("AES-128 key must be 16 bytes (32 hex characters)")
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    parse_hex16(hex_str)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
