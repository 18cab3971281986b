//! Table-driven Huffman decoder.
//!
//! The code table is compiled once into a finite state machine that consumes
//! four input bits per step. States are the internal nodes of the Huffman
//! tree (256 of them for this table), so a [`DecodeState`] fits in a byte and
//! decoding can stop and resume at any byte boundary of the input, even in
//! the middle of a code.
//!
//! # Transition Table
//!
//! ```text
//! rows:    one per state (tree node), root = 0
//! columns: the 16 nibble values
//! entry:   next state | emitted byte | flags (ACCEPTED, SYM, FAIL)
//! ```
//!
//! A nibble emits at most one byte because the shortest code is 5 bits.
//! `ACCEPTED` marks states where the input may legally end: the root, or any
//! node reached from the root through 1 to 7 one-bits (EOS padding).
//! Reaching the EOS leaf sets `FAIL`.
//!
//! # Modes
//!
//! - [`Mode::Resumable`]: the chunk may end mid-code
//! - [`Mode::Final`]: the chunk must end in an accepting state
//!
//! Both modes report [`DecodeError::InvalidCode`] as soon as the failing
//! nibble is seen.

use std::sync::OnceLock;

use crate::error::{DecodeError, Result};
use crate::sink::{ByteSink, FixedBuf};
use crate::table::{self, Symbol};

const ACCEPTED: u8 = 0x01;
const SYM: u8 = 0x02;
const FAIL: u8 = 0x04;

#[derive(Debug, Clone, Copy, Default)]
struct Transition {
    next: u8,
    sym: u8,
    flags: u8,
}

type Row = [Transition; 16];

fn decode_table() -> &'static [Row] {
    static TABLE: OnceLock<Box<[Row]>> = OnceLock::new();
    TABLE.get_or_init(build_decode_table)
}

#[derive(Debug, Clone, Copy)]
enum Child {
    Empty,
    Node(usize),
    Leaf(Symbol),
}

#[derive(Debug)]
struct TreeNode {
    children: [Child; 2],
    depth: u8,
    all_ones: bool,
}

fn build_tree() -> Vec<TreeNode> {
    let mut nodes = vec![TreeNode {
        children: [Child::Empty; 2],
        depth: 0,
        all_ones: true,
    }];

    for (index, code) in table::CODES.iter().enumerate() {
        let Some(symbol) = Symbol::from_index(index) else {
            continue;
        };

        let mut at = 0;
        for shift in (0..code.bits).rev() {
            let bit = ((code.code >> shift) & 1) as usize;
            if shift == 0 {
                nodes[at].children[bit] = Child::Leaf(symbol);
                break;
            }
            let child = nodes[at].children[bit];
            at = match child {
                Child::Node(next) => next,
                _ => {
                    let next = nodes.len();
                    nodes.push(TreeNode {
                        children: [Child::Empty; 2],
                        depth: nodes[at].depth + 1,
                        all_ones: nodes[at].all_ones && bit == 1,
                    });
                    nodes[at].children[bit] = Child::Node(next);
                    next
                }
            };
        }
    }

    nodes
}

fn build_decode_table() -> Box<[Row]> {
    let nodes = build_tree();
    debug_assert!(nodes.len() <= 256, "state ids must fit in a byte");

    let accepting = |id: usize| id == 0 || (nodes[id].all_ones && nodes[id].depth <= 7);

    let mut rows = vec![[Transition::default(); 16]; nodes.len()];
    for (id, row) in rows.iter_mut().enumerate() {
        for (nibble, entry) in row.iter_mut().enumerate() {
            let mut at = id;
            let mut emitted = None;
            let mut failed = false;

            for shift in (0..4).rev() {
                match nodes[at].children[(nibble >> shift) & 1] {
                    Child::Node(next) => at = next,
                    Child::Leaf(Symbol::Byte(b)) => {
                        emitted = Some(b);
                        at = 0;
                    }
                    Child::Leaf(Symbol::Eos) | Child::Empty => {
                        failed = true;
                        break;
                    }
                }
            }

            *entry = if failed {
                Transition {
                    next: 0,
                    sym: 0,
                    flags: FAIL,
                }
            } else {
                let mut flags = 0;
                if accepting(at) {
                    flags |= ACCEPTED;
                }
                if emitted.is_some() {
                    flags |= SYM;
                }
                Transition {
                    next: at as u8,
                    sym: emitted.unwrap_or(0),
                    flags,
                }
            };
        }
    }

    tracing::debug!(states = rows.len(), "built huffman decode table");
    rows.into_boxed_slice()
}

/// Whether a chunk may end in the middle of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// More input follows; the state is carried to the next call
    Resumable,
    /// This is the last input; it must end on a symbol or valid padding
    Final,
}

/// Everything needed to continue decoding a stream in a later call.
///
/// One state per stream; it is `Copy` so a caller can snapshot it before a
/// call and retry after an overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeState {
    state: u8,
    accepting: bool,
    failed: bool,
}

impl DecodeState {
    /// Start state: at the tree root, accepting, so empty input is valid.
    pub const fn new() -> Self {
        Self {
            state: 0,
            accepting: true,
            failed: false,
        }
    }

    /// Current FSM state (tree node id, root = 0).
    pub fn state(&self) -> u8 {
        self.state
    }

    /// True if the stream could legally end here.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// True once an invalid code has been seen; the stream cannot continue.
    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

impl Default for DecodeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a successful [`decode_chunk`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeProgress {
    /// Input bytes consumed (always the whole chunk)
    pub consumed: usize,
    /// Bytes appended to the sink
    pub produced: usize,
}

/// Decode one chunk of a Huffman stream.
///
/// `state` carries the position inside a partial code between calls. It is
/// updated on success and on a `Final` truncation. On `InvalidCode` it is
/// poisoned. On overflow it is left as it was, so the chunk can be replayed
/// into a larger sink.
///
/// # Errors
/// - `DecodeError::InvalidCode` at the first nibble that cannot continue a code
/// - `DecodeError::TruncatedInput` in `Final` mode if the input ends mid-code
/// - `DecodeError::Poisoned` if `state` already failed
/// - `Error::Overflow` if the sink fills up
pub fn decode_chunk<S: ByteSink + ?Sized>(
    src: &[u8],
    state: &mut DecodeState,
    sink: &mut S,
    mode: Mode,
) -> Result<DecodeProgress> {
    if state.failed {
        return Err(DecodeError::Poisoned.into());
    }

    let table = decode_table();
    let start = sink.written();
    let mut cur = *state;

    for (i, &byte) in src.iter().enumerate() {
        for (half, nibble) in [(0, byte >> 4), (1, byte & 0x0f)] {
            let t = table[cur.state as usize][nibble as usize];
            if t.flags & FAIL != 0 {
                let position = i * 8 + half * 4;
                tracing::debug!(position, "invalid huffman code");
                state.failed = true;
                state.accepting = false;
                return Err(DecodeError::InvalidCode { position }.into());
            }
            if t.flags & SYM != 0 {
                sink.push_byte(t.sym)?;
            }
            cur.state = t.next;
            cur.accepting = t.flags & ACCEPTED != 0;
        }
    }

    *state = cur;
    let produced = sink.written() - start;

    if mode == Mode::Final && !cur.accepting {
        tracing::debug!(produced, state = cur.state, "huffman input ends mid-code");
        return Err(DecodeError::TruncatedInput { produced }.into());
    }

    Ok(DecodeProgress {
        consumed: src.len(),
        produced,
    })
}

/// Decode a complete stream into `sink`.
///
/// # Returns
/// Number of bytes appended to the sink.
pub fn decode<S: ByteSink + ?Sized>(src: &[u8], sink: &mut S) -> Result<usize> {
    let mut state = DecodeState::new();
    let progress = decode_chunk(src, &mut state, sink, Mode::Final)?;
    Ok(progress.produced)
}

/// Decode a complete stream into a caller-provided buffer.
///
/// # Errors
/// `InvalidCode`, `TruncatedInput`, or `Overflow` if `dst` is too short.
pub fn decode_to_slice(src: &[u8], dst: &mut [u8]) -> Result<usize> {
    let mut sink = FixedBuf::new(dst);
    decode(src, &mut sink)
}

/// Decode a complete stream into a new vector.
pub fn decode_to_vec(src: &[u8]) -> Result<Vec<u8>> {
    // Every output byte costs at least 5 input bits.
    let mut out = Vec::with_capacity(src.len() * 8 / 5 + 1);
    decode(src, &mut out)?;
    Ok(out)
}

/// Streaming decoder owning its resumption state.
///
/// # Example
/// ```
/// use hpack_huffman_core::decoder::Decoder;
///
/// let mut decoder = Decoder::new();
/// let mut out = Vec::new();
/// decoder.feed(&[0xa8, 0xeb, 0x10], &mut out).unwrap();
/// decoder.feed(&[0x64, 0x9c, 0xbf], &mut out).unwrap();
/// decoder.finish(&mut out).unwrap();
/// assert_eq!(out, b"no-cache");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    state: DecodeState,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            state: DecodeState::new(),
        }
    }

    pub fn state(&self) -> &DecodeState {
        &self.state
    }

    /// Decode a chunk that may end mid-code.
    pub fn feed<S: ByteSink + ?Sized>(&mut self, chunk: &[u8], sink: &mut S) -> Result<DecodeProgress> {
        decode_chunk(chunk, &mut self.state, sink, Mode::Resumable)
    }

    /// Decode the last chunk of the stream.
    pub fn feed_final<S: ByteSink + ?Sized>(&mut self, chunk: &[u8], sink: &mut S) -> Result<DecodeProgress> {
        decode_chunk(chunk, &mut self.state, sink, Mode::Final)
    }

    /// Declare end of input.
    ///
    /// # Errors
    /// `TruncatedInput` if the bytes fed so far end mid-code.
    pub fn finish<S: ByteSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.feed_final(&[], sink).map(|_| ())
    }

    /// Start over with a fresh state.
    pub fn reset(&mut self) {
        self.state = DecodeState::new();
    }
}
