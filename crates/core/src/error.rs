//! Error types for the Huffman codec.
//!
//! Every failure is a returned value. Nothing already written to a sink is
//! rolled back when an error is reported; callers that need atomic output
//! encode into a scratch buffer first.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Overflow: the destination could not take another byte
/// - Decode: the bit stream is not a valid encoding
/// - Config: a sink or driver was configured inconsistently
/// - I/O: reading benchmark input
#[derive(Debug, Error)]
pub enum Error {
    /// Destination exhausted before the operation completed
    #[error("output overflow: {0}")]
    Overflow(#[from] OverflowError),

    /// Bit stream could not be decoded
    #[error("huffman decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ways a sink can refuse a byte.
///
/// Both variants classify as [`ErrorKind::Overflow`]; they are kept apart so
/// callers can tell a full fixed buffer from a chain that hit its ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverflowError {
    /// Fixed-capacity buffer is full
    #[error("buffer full at capacity {capacity}")]
    BufferFull { capacity: usize },

    /// Chunk chain already holds its maximum number of chunks
    #[error("chunk chain exhausted: max {max_chunks} chunks")]
    ChainExhausted { max_chunks: usize },
}

/// Decoder failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A bit pattern that no code can produce (in practice, EOS inside the stream)
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// Input ended mid-code or with padding that is not a valid EOS prefix
    #[error("truncated huffman input after {produced} decoded bytes")]
    TruncatedInput { produced: usize },

    /// The resumption state already failed with an invalid code
    #[error("decoder state is poisoned by an earlier invalid code")]
    Poisoned,
}

/// Stable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Overflow,
    InvalidCode,
    TruncatedInput,
    Config,
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Overflow(_) => ErrorKind::Overflow,
            Error::Decode(DecodeError::InvalidCode { .. } | DecodeError::Poisoned) => {
                ErrorKind::InvalidCode
            }
            Error::Decode(DecodeError::TruncatedInput { .. }) => ErrorKind::TruncatedInput,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// True for both fixed-buffer and chunk-chain exhaustion.
    pub fn is_overflow(&self) -> bool {
        self.kind() == ErrorKind::Overflow
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
