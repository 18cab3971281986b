//! Growable output made of fixed-size chunks.
//!
//! A [`ChunkChain`] grows by linking whole chunks instead of reallocating, so
//! bytes already written never move. Chunks live in an arena (`Vec<Chunk>`)
//! and the write cursor is an index into it. Growth stops at
//! `max_chunks`; past that, writes fail with
//! [`OverflowError::ChainExhausted`].
//!
//! # Reuse
//!
//! [`ChunkChain::reset`] keeps the first `keep_chunks` chunks allocated and
//! empties them in place, then frees the rest. A chain reset after every
//! encode call therefore stops allocating once it has warmed up.
//!
//! # Chunk Layout
//!
//! ```text
//! 0          offset        pos            last             chunk_len
//! +------------+-------------+--------------+------------------+
//! | headroom   |             | written data | free             |
//! +------------+-------------+--------------+------------------+
//! ```
//!
//! `pos == offset` for every chunk this crate writes; the headroom lets a
//! caller prepend framing in place later.

use crate::error::{Error, OverflowError, Result};
use crate::sink::ByteSink;

/// Configuration for a [`ChunkChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    /// Capacity of every chunk in bytes, headroom included
    pub chunk_len: usize,

    /// Upper bound on allocated chunks
    pub max_chunks: usize,

    /// Chunks kept allocated by [`ChunkChain::reset`]
    pub keep_chunks: usize,

    /// Headroom reserved at the start of every chunk
    pub offset: usize,
}

impl ChainConfig {
    /// Create a configuration. Call [`ChainConfig::validate`] (or let
    /// [`ChunkChain::new`] do it) before use.
    pub fn new(chunk_len: usize, max_chunks: usize, keep_chunks: usize, offset: usize) -> Self {
        Self {
            chunk_len,
            max_chunks,
            keep_chunks,
            offset,
        }
    }

    /// A single chunk that is never freed: a fixed buffer with reuse.
    pub fn single(chunk_len: usize) -> Self {
        Self::new(chunk_len, 1, 1, 0)
    }

    /// Usable bytes per chunk.
    pub fn chunk_capacity(&self) -> usize {
        self.chunk_len - self.offset
    }

    /// Check the configuration for consistency.
    ///
    /// # Errors
    /// `Error::Config` if `keep_chunks` is zero, `max_chunks < keep_chunks`,
    /// the headroom does not leave room for data, or `chunk_len` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_len == 0 {
            return Err(Error::Config("chunk_len must be at least 1".to_string()));
        }
        if self.keep_chunks == 0 {
            return Err(Error::Config("keep_chunks must be at least 1".to_string()));
        }
        if self.max_chunks < self.keep_chunks {
            return Err(Error::Config(format!(
                "max_chunks {} is below keep_chunks {}",
                self.max_chunks, self.keep_chunks
            )));
        }
        if self.offset >= self.chunk_len {
            return Err(Error::Config(format!(
                "offset {} leaves no room in a {}-byte chunk",
                self.offset, self.chunk_len
            )));
        }
        Ok(())
    }
}

/// One fixed-size block of the chain.
///
/// # Invariants
/// - `offset <= pos <= last <= data.len()`
#[derive(Debug)]
struct Chunk {
    data: Box<[u8]>,
    /// Start of effective data
    pos: usize,
    /// One past the last written byte
    last: usize,
}

impl Chunk {
    fn new(len: usize, offset: usize) -> Self {
        Self {
            data: vec![0u8; len].into_boxed_slice(),
            pos: offset,
            last: offset,
        }
    }

    fn reset(&mut self, offset: usize) {
        self.pos = offset;
        self.last = offset;
    }

    fn avail(&self) -> usize {
        self.data.len() - self.last
    }

    fn bytes(&self) -> &[u8] {
        &self.data[self.pos..self.last]
    }
}

/// Chain of fixed-size output chunks.
///
/// # Invariants
/// - `1 <= chunks.len() <= config.max_chunks`
/// - `cur < chunks.len()`; chunks after `cur` are empty
#[derive(Debug)]
pub struct ChunkChain {
    config: ChainConfig,
    chunks: Vec<Chunk>,
    cur: usize,
}

impl ChunkChain {
    /// Create a chain holding one empty chunk.
    ///
    /// # Errors
    /// `Error::Config` if `config` fails [`ChainConfig::validate`].
    pub fn new(config: ChainConfig) -> Result<Self> {
        config.validate()?;

        let mut chunks = Vec::with_capacity(config.keep_chunks);
        chunks.push(Chunk::new(config.chunk_len, config.offset));

        Ok(Self {
            config,
            chunks,
            cur: 0,
        })
    }

    /// The configuration this chain was built with.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Number of chunks currently allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total bytes of effective data across all chunks.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(|c| c.last - c.pos).sum()
    }

    /// True if nothing has been written since creation or the last reset.
    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|c| c.last == c.pos)
    }

    /// Bytes still writable in the current chunk.
    pub fn current_avail(&self) -> usize {
        self.chunks[self.cur].avail()
    }

    /// Make sure the next byte has somewhere to go.
    ///
    /// Advances to an already-allocated chunk when one exists (left over from
    /// a reset), otherwise allocates a new chunk if the ceiling allows.
    ///
    /// # Errors
    /// `OverflowError::ChainExhausted` when every allowed chunk is full.
    pub fn ensure_capacity_for_one_byte(&mut self) -> std::result::Result<(), OverflowError> {
        if self.chunks[self.cur].avail() > 0 {
            return Ok(());
        }

        if self.cur + 1 < self.chunks.len() {
            self.cur += 1;
            return Ok(());
        }

        if self.chunks.len() == self.config.max_chunks {
            tracing::debug!(
                max_chunks = self.config.max_chunks,
                chunk_len = self.config.chunk_len,
                "chunk chain exhausted"
            );
            return Err(OverflowError::ChainExhausted {
                max_chunks: self.config.max_chunks,
            });
        }

        self.chunks
            .push(Chunk::new(self.config.chunk_len, self.config.offset));
        self.cur = self.chunks.len() - 1;
        tracing::debug!(
            chunks = self.chunks.len(),
            max_chunks = self.config.max_chunks,
            "allocated chunk"
        );
        Ok(())
    }

    /// Empty the chain, keeping the configured number of chunks allocated.
    pub fn reset(&mut self) {
        self.reset_keep(self.config.keep_chunks);
    }

    /// Empty the first `keep` chunks in place and free the rest.
    ///
    /// At least one chunk is always kept. If fewer than `keep` chunks are
    /// allocated, none are freed.
    pub fn reset_keep(&mut self, keep: usize) {
        let keep = keep.max(1);
        let offset = self.config.offset;

        for chunk in self.chunks.iter_mut().take(keep) {
            chunk.reset(offset);
        }

        if self.chunks.len() > keep {
            tracing::debug!(
                freed = self.chunks.len() - keep,
                kept = keep,
                "released chunks on reset"
            );
            self.chunks.truncate(keep);
        }

        self.cur = 0;
    }

    /// Iterate over the effective data of every non-empty chunk, in order.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.chunks
            .iter()
            .map(Chunk::bytes)
            .filter(|bytes| !bytes.is_empty())
    }

    /// Copy all written bytes into a new vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for bytes in self.chunks() {
            out.extend_from_slice(bytes);
        }
        out
    }

    /// Copy all written bytes into `dst`, returning how many were copied.
    ///
    /// # Errors
    /// `OverflowError::BufferFull` if `dst` is shorter than [`ChunkChain::len`];
    /// `dst` is not modified in that case.
    pub fn copy_to(&self, dst: &mut [u8]) -> std::result::Result<usize, OverflowError> {
        let len = self.len();
        if dst.len() < len {
            return Err(OverflowError::BufferFull {
                capacity: dst.len(),
            });
        }

        let mut at = 0;
        for bytes in self.chunks() {
            dst[at..at + bytes.len()].copy_from_slice(bytes);
            at += bytes.len();
        }
        Ok(at)
    }
}

impl ByteSink for ChunkChain {
    #[inline]
    fn push_byte(&mut self, byte: u8) -> std::result::Result<(), OverflowError> {
        self.ensure_capacity_for_one_byte()?;
        let chunk = &mut self.chunks[self.cur];
        chunk.data[chunk.last] = byte;
        chunk.last += 1;
        Ok(())
    }

    fn written(&self) -> usize {
        self.len()
    }
}
