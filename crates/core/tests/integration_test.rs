//! Integration tests for the Huffman codec.
//!
//! These tests drive the public API end to end: random input -> encode
//! (every variant and sink) -> decode (whole and in pieces), with
//! verification that the output matches the input.

use hpack_huffman_core::{
    decode_chunk, decode_to_slice, decode_to_vec, encode, encode_pairs, encode_to_slice,
    encode_to_vec, encoded_len, ChainConfig, ChunkChain, DecodeState, Decoder, ErrorKind,
    FixedBuf, Mode,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_bytes(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

/// Header-ish text, where the short codes dominate.
fn random_text(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
    let alphabet = b"abcdefghijklmnopqrstuvwxyz0123456789-.:/;= ";
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Round trip random byte strings of every length up to 300.
#[test]
fn test_round_trip_random_lengths() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for len in 0..300 {
        let input = random_bytes(&mut rng, len);
        let packed = encode_to_vec(&input);
        assert_eq!(packed.len(), encoded_len(&input), "length {}", len);

        let decoded = decode_to_vec(&packed).expect("decode failed");
        assert_eq!(decoded, input, "round trip failed at length {}", len);
    }
}

/// Round trip through caller-provided buffers of exactly the right size.
#[test]
fn test_round_trip_exact_buffers() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..100 {
        let len = rng.gen_range(1..200);
        let input = random_text(&mut rng, len);

        let mut packed = vec![0u8; encoded_len(&input)];
        let n = encode_to_slice(&input, &mut packed).expect("encode failed");
        assert_eq!(n, packed.len());

        let mut decoded = vec![0u8; input.len()];
        let m = decode_to_slice(&packed, &mut decoded).expect("decode failed");
        assert_eq!(m, input.len());
        assert_eq!(decoded, input);
    }
}

/// Every encoder variant and sink kind produces the same bytes.
#[test]
fn test_determinism_across_variants_and_sinks() {
    let mut rng = ChaCha8Rng::seed_from_u64(12345);

    for _ in 0..50 {
        let len = rng.gen_range(0..500);
        let input = random_bytes(&mut rng, len);
        let reference = encode_to_vec(&input);

        // Fresh vector, same answer.
        assert_eq!(encode_to_vec(&input), reference);

        let mut paired = Vec::new();
        encode_pairs(&input, &mut paired).unwrap();
        assert_eq!(paired, reference);

        let mut storage = vec![0u8; 4096];
        let mut fixed = FixedBuf::new(&mut storage);
        encode(&input, &mut fixed).unwrap();
        assert_eq!(fixed.filled(), &reference[..]);

        let mut chain = ChunkChain::new(ChainConfig::new(32, 128, 1, 0)).unwrap();
        encode_pairs(&input, &mut chain).unwrap();
        assert_eq!(chain.to_vec(), reference);
    }
}

/// Padding written by the encoder is always accepted by a final decode.
#[test]
fn test_padding_always_valid() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..500 {
        let len = rng.gen_range(1..40);
        let input = random_bytes(&mut rng, len);
        let packed = encode_to_vec(&input);

        let mut state = DecodeState::new();
        let mut out = Vec::new();
        decode_chunk(&packed, &mut state, &mut out, Mode::Final).expect("padding rejected");
        assert!(state.is_accepting());
        assert_eq!(out, input);
    }
}

/// Splitting the encoded stream at any point does not change the output.
#[test]
fn test_split_invariance() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..20 {
        let len = rng.gen_range(1..60);
        let input = random_bytes(&mut rng, len);
        let packed = encode_to_vec(&input);

        for split in 0..=packed.len() {
            let mut decoder = Decoder::new();
            let mut out = Vec::new();
            decoder.feed(&packed[..split], &mut out).unwrap();
            decoder.feed_final(&packed[split..], &mut out).unwrap();
            assert_eq!(out, input, "split at {}", split);
        }
    }
}

/// Feed the stream in random-sized pieces, then finish.
#[test]
fn test_random_chunking() {
    let mut rng = ChaCha8Rng::seed_from_u64(555);
    let input = random_text(&mut rng, 2000);
    let packed = encode_to_vec(&input);

    let mut decoder = Decoder::new();
    let mut out = Vec::new();
    let mut offset = 0;
    while offset < packed.len() {
        let take = rng.gen_range(1..=17).min(packed.len() - offset);
        decoder
            .feed(&packed[offset..offset + take], &mut out)
            .expect("chunk failed");
        offset += take;
    }
    decoder.finish(&mut out).expect("finish failed");

    assert_eq!(out, input);
}

/// A run of 30 ones from a code boundary is the EOS code, which is illegal.
#[test]
fn test_corruption_detected() {
    let mut rng = ChaCha8Rng::seed_from_u64(31337);

    for _ in 0..100 {
        let len = rng.gen_range(0..50);
        let input = random_bytes(&mut rng, len);
        let mut packed = encode_to_vec(&input);
        packed.extend_from_slice(&[0xff, 0xff, 0xff, 0xff]);

        let err = decode_to_vec(&packed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCode);

        // Resumable mode reports it just the same.
        let mut state = DecodeState::new();
        let mut out = Vec::new();
        let err = decode_chunk(&packed, &mut state, &mut out, Mode::Resumable).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCode);
        assert!(state.is_failed());
    }
}

/// Dropping the last byte either truncates mid-code or leaves a shorter
/// valid prefix.
#[test]
fn test_truncation_is_reported() {
    // "www.example.com" ends mid-code once its last byte is gone.
    let packed = encode_to_vec(b"www.example.com");
    let err = decode_to_vec(&packed[..packed.len() - 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TruncatedInput);

    let mut rng = ChaCha8Rng::seed_from_u64(8);
    for _ in 0..100 {
        let len = rng.gen_range(1..30);
        let input = random_bytes(&mut rng, len);
        let packed = encode_to_vec(&input);
        match decode_to_vec(&packed[..packed.len() - 1]) {
            Ok(out) => assert!(input.starts_with(&out)),
            Err(e) => assert_eq!(e.kind(), ErrorKind::TruncatedInput),
        }
    }
}

/// One chain reused across many encodes stays within its keep budget.
#[test]
fn test_chain_reuse_after_reset() {
    let mut rng = ChaCha8Rng::seed_from_u64(4242);
    let mut chain = ChunkChain::new(ChainConfig::new(64, 8, 2, 4)).unwrap();

    for _ in 0..200 {
        let len = rng.gen_range(0..100);
        let input = random_bytes(&mut rng, len);

        let n = encode(&input, &mut chain).expect("encode failed");
        assert_eq!(n, encoded_len(&input));
        assert_eq!(chain.len(), n);
        assert_eq!(decode_to_vec(&chain.to_vec()).unwrap(), input);

        chain.reset();
        assert!(chain.is_empty());
        assert!(chain.chunk_count() <= 2);
    }
}

/// The single-chunk wrapper configuration refuses output larger than one
/// chunk and recovers after a reset.
#[test]
fn test_single_chunk_chain_overflow() {
    let mut chain = ChunkChain::new(ChainConfig::single(8)).unwrap();
    let input = b"custom-value-custom-value";

    let err = encode(input, &mut chain).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Overflow);
    assert_eq!(chain.len(), 8);

    chain.reset();
    let n = encode(b"302", &mut chain).unwrap();
    assert_eq!(n, 2);
    assert_eq!(chain.to_vec(), vec![0x64, 0x02]);
}

/// Independent streams on separate threads share only the static tables.
#[test]
fn test_concurrent_streams() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            std::thread::spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                for _ in 0..50 {
                    let len = rng.gen_range(0..256);
                    let input = random_bytes(&mut rng, len);

                    let mut packed = Vec::new();
                    encode_pairs(&input, &mut packed).unwrap();

                    let mut decoder = Decoder::new();
                    let mut out = Vec::new();
                    let mid = packed.len() / 2;
                    decoder.feed(&packed[..mid], &mut out).unwrap();
                    decoder.feed_final(&packed[mid..], &mut out).unwrap();
                    assert_eq!(out, input);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
}
