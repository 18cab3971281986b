//! Huffman encoder.
//!
//! Packs each input byte's code into a [`BitAccumulator`], emits complete
//! bytes to a [`ByteSink`] as soon as they exist, and pads the last partial
//! byte with the leading bits of the EOS code.
//!
//! Two loops produce bit-identical output:
//! - [`encode`] looks up one symbol per step
//! - [`encode_pairs`] looks up two symbols per step through a 65 536-entry
//!   table built on first use
//!
//! # Overflow
//!
//! When the sink refuses a byte the call fails with `Error::Overflow`. Bytes
//! accepted before the refusal remain in the sink; no partial byte is ever
//! written.

use std::sync::OnceLock;

use crate::bitio::BitAccumulator;
use crate::error::Result;
use crate::sink::{ByteSink, FixedBuf};
use crate::table;

/// Encode `src` into `sink`, one symbol at a time.
///
/// # Returns
/// Number of bytes appended to the sink.
///
/// # Errors
/// `Error::Overflow` if the sink fills up.
pub fn encode<S: ByteSink + ?Sized>(src: &[u8], sink: &mut S) -> Result<usize> {
    let start = sink.written();
    let mut acc = BitAccumulator::new();

    for &byte in src {
        let sym = table::code_for(byte);
        acc.push(sym.code as u64, sym.bits as u32);
        acc.drain(sink)?;
    }

    acc.finish(sink)?;
    Ok(sink.written() - start)
}

/// Combined code of two consecutive bytes.
#[derive(Debug, Clone, Copy, Default)]
struct PairCode {
    code: u64,
    bits: u8,
}

fn pair_table() -> &'static [PairCode] {
    static PAIRS: OnceLock<Box<[PairCode]>> = OnceLock::new();
    PAIRS.get_or_init(build_pair_table)
}

fn build_pair_table() -> Box<[PairCode]> {
    let mut pairs = vec![PairCode::default(); 1 << 16];
    for (idx, slot) in pairs.iter_mut().enumerate() {
        let first = table::code_for((idx >> 8) as u8);
        let second = table::code_for(idx as u8);
        *slot = PairCode {
            code: ((first.code as u64) << second.bits) | second.code as u64,
            bits: first.bits + second.bits,
        };
    }
    tracing::debug!(entries = pairs.len(), "built pair encode table");
    pairs.into_boxed_slice()
}

/// Encode `src` into `sink`, two symbols per lookup.
///
/// Output is identical to [`encode`]. A pair that does not fit beside the
/// pending bits is split and pushed as two single codes.
///
/// # Errors
/// `Error::Overflow` if the sink fills up.
pub fn encode_pairs<S: ByteSink + ?Sized>(src: &[u8], sink: &mut S) -> Result<usize> {
    let start = sink.written();
    let pairs = pair_table();
    let mut acc = BitAccumulator::new();

    let mut iter = src.chunks_exact(2);
    for two in iter.by_ref() {
        let pair = pairs[(two[0] as usize) << 8 | two[1] as usize];
        if pair.bits as u32 <= acc.room() {
            acc.push(pair.code, pair.bits as u32);
        } else {
            let first = table::code_for(two[0]);
            acc.push(first.code as u64, first.bits as u32);
            acc.drain(sink)?;
            let second = table::code_for(two[1]);
            acc.push(second.code as u64, second.bits as u32);
        }
        acc.drain(sink)?;
    }

    if let [last] = iter.remainder() {
        let sym = table::code_for(*last);
        acc.push(sym.code as u64, sym.bits as u32);
    }

    acc.finish(sink)?;
    Ok(sink.written() - start)
}

/// Exact number of bytes [`encode`] produces for `src`.
pub fn encoded_len(src: &[u8]) -> usize {
    let bits: usize = src
        .iter()
        .map(|&b| table::code_for(b).bits as usize)
        .sum();
    (bits + 7) / 8
}

/// Encode into a caller-provided buffer.
///
/// # Returns
/// Number of bytes written to the front of `dst`.
///
/// # Errors
/// `Error::Overflow` if `dst` is shorter than [`encoded_len`] of `src`.
pub fn encode_to_slice(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    let mut sink = FixedBuf::new(dst);
    encode(src, &mut sink)
}

/// Encode into a new vector sized exactly for the output.
pub fn encode_to_vec(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(src));
    // A Vec never refuses a byte.
    let _ = encode(src, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{ChainConfig, ChunkChain};
    use crate::error::{Error, OverflowError};

    #[test]
    fn test_single_five_bit_symbol() {
        let mut dst = [0u8; 1];
        let n = encode_to_slice(b"0", &mut dst).unwrap();
        assert_eq!(n, 1);
        assert_eq!(dst[0], 0b00000_111);

        assert_eq!(encode_to_vec(b"a"), vec![0b00011_111]);
    }

    fn check_vector(input: &[u8], expected: &[u8]) {
        assert_eq!(encode_to_vec(input), expected, "input {:?}", input);
        let mut out = Vec::new();
        encode_pairs(input, &mut out).unwrap();
        assert_eq!(out, expected, "pairs, input {:?}", input);
    }

    #[test]
    fn test_rfc7541_vectors() {
        check_vector(
            b"www.example.com",
            &[0xf1, 0xe3, 0xc2, 0xe5, 0xf2, 0x3a, 0x6b, 0xa0, 0xab, 0x90, 0xf4, 0xff],
        );
        check_vector(b"no-cache", &[0xa8, 0xeb, 0x10, 0x64, 0x9c, 0xbf]);
        check_vector(b"custom-key", &[0x25, 0xa8, 0x49, 0xe9, 0x5b, 0xa9, 0x7d, 0x7f]);
        check_vector(
            b"custom-value",
            &[0x25, 0xa8, 0x49, 0xe9, 0x5b, 0xb8, 0xe8, 0xb4, 0xbf],
        );
        check_vector(b"302", &[0x64, 0x02]);
        check_vector(b"private", &[0xae, 0xc3, 0x77, 0x1a, 0x4b]);
    }

    #[test]
    fn test_empty_input() {
        let mut dst: [u8; 0] = [];
        assert_eq!(encode_to_slice(b"", &mut dst).unwrap(), 0);
        assert_eq!(encoded_len(b""), 0);
    }

    #[test]
    fn test_zero_capacity_overflows() {
        let mut dst: [u8; 0] = [];
        let result = encode_to_slice(b"a", &mut dst);
        assert!(matches!(
            result,
            Err(Error::Overflow(OverflowError::BufferFull { capacity: 0 }))
        ));
    }

    #[test]
    fn test_exact_capacity_succeeds() {
        let input = b"www.example.com";
        let need = encoded_len(input);
        assert_eq!(need, 12);

        let mut exact = vec![0u8; need];
        assert_eq!(encode_to_slice(input, &mut exact).unwrap(), need);
        assert_eq!(exact, encode_to_vec(input));

        let mut short = vec![0u8; need - 1];
        let err = encode_to_slice(input, &mut short).unwrap_err();
        assert!(err.is_overflow());
        // Everything that fit is committed.
        assert_eq!(&short[..], &exact[..need - 1]);
    }

    #[test]
    fn test_longest_codes_pair_fallback() {
        // Bytes 10, 13 and 22 have 30-bit codes. A 60-bit pair only fits
        // with at most 4 bits pending, so some of these get split.
        let input = [b'a', 10, 13, 22, 10, b'0', 13, 22];
        let single = encode_to_vec(&input);
        let mut paired = Vec::new();
        encode_pairs(&input, &mut paired).unwrap();
        assert_eq!(single, paired);
        assert_eq!(single.len(), encoded_len(&input));
    }

    #[test]
    fn test_all_pairs_match_single() {
        let input: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
        let mut paired = Vec::new();
        encode_pairs(&input, &mut paired).unwrap();
        assert_eq!(paired, encode_to_vec(&input));

        // Odd length exercises the trailing single byte.
        let mut paired = Vec::new();
        encode_pairs(&input[..301], &mut paired).unwrap();
        assert_eq!(paired, encode_to_vec(&input[..301]));
    }

    #[test]
    fn test_chain_sink_matches_slice() {
        let input = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
        let mut chain = ChunkChain::new(ChainConfig::new(16, 64, 1, 0)).unwrap();
        let n = encode(&input, &mut chain).unwrap();

        assert_eq!(n, encoded_len(&input));
        assert!(chain.chunk_count() > 1);
        assert_eq!(chain.to_vec(), encode_to_vec(&input));
    }

    #[test]
    fn test_chain_exhaustion_is_overflow() {
        let input = vec![0u8; 64]; // 13 bits each, 104 bytes out
        let mut chain = ChunkChain::new(ChainConfig::new(32, 2, 1, 0)).unwrap();
        let err = encode(&input, &mut chain).unwrap_err();
        assert!(matches!(
            err,
            Error::Overflow(OverflowError::ChainExhausted { max_chunks: 2 })
        ));
        assert!(err.is_overflow());
        assert_eq!(chain.len(), 64);
    }

    #[test]
    fn test_returns_bytes_appended_not_total() {
        let mut out = vec![0xEE];
        let n = encode(b"no-cache", &mut out).unwrap();
        assert_eq!(n, 6);
        assert_eq!(out.len(), 7);
    }
}
