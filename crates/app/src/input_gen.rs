//! Sample input generation for benchmarking.
//!
//! When no input file is given, we generate text shaped like HTTP header
//! fields, which is what the codec compresses in practice.
//!
//! # Design
//!
//! Generated data mixes:
//! - Common header fields (short codes dominate, good compression)
//! - Random tokens from a URL-safe alphabet
//! - An occasional run of raw random bytes (long codes, output grows)
//!
//! This makes the compression ratio in the metrics meaningful.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const COMMON_FIELDS: &[&str] = &[
    "accept-encoding: gzip, deflate, br",
    "cache-control: no-cache",
    "content-type: text/html; charset=utf-8",
    "user-agent: Mozilla/5.0 (X11; Linux x86_64)",
    "date: Mon, 21 Oct 2013 20:13:21 GMT",
    "location: https://www.example.com",
    "set-cookie: foo=ASDJKHQKBZXOQWEOPIUAXQWEOIU; max-age=3600; version=1",
];

const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-._~";

/// Generate a sample of header-like text.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact size of generated data
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        match rng.gen_range(0..10) {
            // 60% well-known header fields
            0..=5 => {
                let field = COMMON_FIELDS[rng.gen_range(0..COMMON_FIELDS.len())];
                data.extend_from_slice(field.as_bytes());
            }

            // 30% custom header with a random token value
            6..=8 => {
                data.extend_from_slice(b"x-request-id: ");
                let len = rng.gen_range(8..=32);
                for _ in 0..len {
                    data.push(TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())]);
                }
            }

            // 10% arbitrary bytes
            _ => {
                let len = rng.gen_range(1..=16);
                for _ in 0..len {
                    data.push(rng.gen());
                }
            }
        }
    }

    // Truncate to exact size
    data.truncate(size_bytes);
    data
}
