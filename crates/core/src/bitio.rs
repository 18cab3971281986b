//! Bit accumulation for the encoder.
//!
//! [`BitAccumulator`] collects variable-length codes MSB-first in a 64-bit
//! register and hands complete bytes to a [`ByteSink`]. Between symbols the
//! register holds fewer than 8 pending bits, so a full 30-bit code always
//! fits. Wider pushes must check [`BitAccumulator::room`] first.
//!
//! # Padding Rules
//! - the final partial byte is completed with the leading bits of the EOS
//!   code, which are all ones
//! - nothing is emitted when the input ended exactly on a byte boundary
//!
//! # Example
//! ```
//! use hpack_huffman_core::bitio::BitAccumulator;
//!
//! let mut acc = BitAccumulator::new();
//! let mut out = Vec::new();
//! acc.push(0b00011, 5);            // 'a'
//! acc.drain(&mut out).unwrap();    // fewer than 8 bits, nothing yet
//! acc.finish(&mut out).unwrap();   // 00011 + 111 padding
//! assert_eq!(out, vec![0x1f]);
//! ```

use crate::error::OverflowError;
use crate::sink::ByteSink;
use crate::table;

/// Width of the accumulator register in bits.
pub const REGISTER_BITS: u32 = u64::BITS;

/// Pending output bits, most significant first.
///
/// # Invariants
/// - `used <= 64`
/// - only the low `used` bits of `bits` are meaningful
#[derive(Debug, Clone, Default)]
pub struct BitAccumulator {
    bits: u64,
    used: u32,
}

impl BitAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self { bits: 0, used: 0 }
    }

    /// Number of bits waiting to be emitted.
    #[inline]
    pub fn pending(&self) -> u32 {
        self.used
    }

    /// Bits that can still be pushed without overflowing the register.
    #[inline]
    pub fn room(&self) -> u32 {
        REGISTER_BITS - self.used
    }

    /// Append the low `count` bits of `code`.
    ///
    /// The caller guarantees `count <= self.room()` and `count < 64`.
    #[inline]
    pub fn push(&mut self, code: u64, count: u32) {
        debug_assert!(count < REGISTER_BITS && count <= self.room());
        self.bits = (self.bits << count) | code;
        self.used += count;
    }

    /// Emit every complete byte, leaving fewer than 8 bits pending.
    ///
    /// # Errors
    /// Propagates the sink's overflow. Bytes emitted before the failure stay
    /// in the sink.
    #[inline]
    pub fn drain<S: ByteSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), OverflowError> {
        while self.used >= 8 {
            sink.push_byte((self.bits >> (self.used - 8)) as u8)?;
            self.used -= 8;
        }
        Ok(())
    }

    /// Drain, then pad any trailing partial byte with EOS bits and emit it.
    ///
    /// Leaves the accumulator empty on success.
    pub fn finish<S: ByteSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), OverflowError> {
        self.drain(sink)?;

        if self.used > 0 {
            let pad = 8 - self.used;
            let fill = table::eos().prefix(pad as u8) as u64;
            sink.push_byte(((self.bits << pad) | fill) as u8)?;
        }

        self.bits = 0;
        self.used = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::FixedBuf;

    #[test]
    fn test_byte_aligned_needs_no_padding() {
        let mut acc = BitAccumulator::new();
        let mut out = Vec::new();
        acc.push(0b1011_0011, 8);
        acc.finish(&mut out).unwrap();
        assert_eq!(out, vec![0b1011_0011]);
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_partial_bits_padded_with_ones() {
        let mut acc = BitAccumulator::new();
        let mut out = Vec::new();
        acc.push(0b101, 3);
        acc.push(0b00, 2);
        acc.finish(&mut out).unwrap();
        assert_eq!(out, vec![0b1010_0111]);
    }

    #[test]
    fn test_drain_keeps_remainder() {
        let mut acc = BitAccumulator::new();
        let mut out = Vec::new();
        acc.push(0x3fff_ffff, 30);
        acc.drain(&mut out).unwrap();
        assert_eq!(out, vec![0xff, 0xff, 0xff]);
        assert_eq!(acc.pending(), 6);
    }

    #[test]
    fn test_wide_push() {
        let mut acc = BitAccumulator::new();
        let mut out = Vec::new();
        acc.push(0x0012_3456_789a_bcde, 56);
        acc.finish(&mut out).unwrap();
        assert_eq!(out, vec![0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde]);
    }

    #[test]
    fn test_drain_stops_on_overflow() {
        let mut acc = BitAccumulator::new();
        let mut storage = [0u8; 1];
        let mut sink = FixedBuf::new(&mut storage);
        acc.push(0xabcd, 16);
        assert!(acc.drain(&mut sink).is_err());
        assert_eq!(sink.filled(), &[0xab]);
    }

    #[test]
    fn test_room() {
        let mut acc = BitAccumulator::new();
        assert_eq!(acc.room(), 64);
        acc.push(0, 7);
        assert_eq!(acc.room(), 57);
    }
}
