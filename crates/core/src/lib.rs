//! hpack-huffman-core: static Huffman codec for the HPACK byte alphabet
//!
//! This library encodes byte strings with the fixed Huffman code of
//! RFC 7541 Appendix B and decodes them back, bit-exactly:
//! - Encodes through a 64-bit bit accumulator with EOS padding
//! - Decodes with a 4-bit-per-step state machine that can stop and resume
//!   at any byte boundary, even mid-code
//! - Writes into fixed buffers, vectors, or a chain of fixed-size chunks
//!
//! # Architecture
//!
//! - `table`: the 257-entry code table
//! - `bitio`: bit accumulation for the encoder
//! - `sink`: the `ByteSink` trait and the fixed-buffer sink
//! - `chain`: growable chunk-chain sink with reset and reuse
//! - `encoder`: single-symbol and pair-lookahead encoders
//! - `decoder`: nibble-table decoder with resumable and final modes
//! - `metrics`: counters and timing for repeated runs
//!
//! # Example
//!
//! ```
//! use hpack_huffman_core::{decode_to_vec, encode_to_vec};
//!
//! let packed = encode_to_vec(b"www.example.com");
//! assert_eq!(packed.len(), 12);
//! assert_eq!(decode_to_vec(&packed).unwrap(), b"www.example.com");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **No rollback**: output written before an error stays written
//! - **Immutable tables**: built once, shared by every thread

pub mod bitio;
pub mod chain;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod metrics;
pub mod sink;
pub mod table;

// Re-export commonly used types
pub use chain::{ChainConfig, ChunkChain};
pub use decoder::{
    decode, decode_chunk, decode_to_slice, decode_to_vec, DecodeProgress, DecodeState, Decoder,
    Mode,
};
pub use encoder::{encode, encode_pairs, encode_to_slice, encode_to_vec, encoded_len};
pub use error::{DecodeError, Error, ErrorKind, OverflowError, Result};
pub use metrics::CodecMetrics;
pub use sink::{ByteSink, FixedBuf};
