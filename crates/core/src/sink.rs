//! Byte sinks that receive encoder and decoder output.
//!
//! The codecs only ever append one byte at a time, so a sink is little more
//! than a bounds check. Three sinks are provided:
//! - [`FixedBuf`]: a borrowed slice; writing past its end is an overflow
//! - `Vec<u8>`: grows without limit
//! - [`ChunkChain`](crate::chain::ChunkChain): fixed-size chunks up to a ceiling

use crate::error::OverflowError;

/// Destination for bytes produced by the encoder or decoder.
pub trait ByteSink {
    /// Append one byte.
    ///
    /// # Errors
    /// Returns an [`OverflowError`] if the sink cannot take another byte. The
    /// sink must be left exactly as it was before the call.
    fn push_byte(&mut self, byte: u8) -> Result<(), OverflowError>;

    /// Total bytes written since the sink was created or last reset.
    fn written(&self) -> usize;
}

/// Fixed-capacity sink over a borrowed buffer.
///
/// # Invariants
/// - `pos <= buf.len()`
#[derive(Debug)]
pub struct FixedBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FixedBuf<'a> {
    /// Wrap `buf`; writing starts at its first byte.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Total capacity of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The bytes written so far.
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Forget everything written; the buffer contents are left in place.
    pub fn clear(&mut self) {
        self.pos = 0;
    }
}

impl ByteSink for FixedBuf<'_> {
    #[inline]
    fn push_byte(&mut self, byte: u8) -> Result<(), OverflowError> {
        match self.buf.get_mut(self.pos) {
            Some(slot) => {
                *slot = byte;
                self.pos += 1;
                Ok(())
            }
            None => Err(OverflowError::BufferFull {
                capacity: self.buf.len(),
            }),
        }
    }

    fn written(&self) -> usize {
        self.pos
    }
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn push_byte(&mut self, byte: u8) -> Result<(), OverflowError> {
        self.push(byte);
        Ok(())
    }

    fn written(&self) -> usize {
        self.len()
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn push_byte(&mut self, byte: u8) -> Result<(), OverflowError> {
        (**self).push_byte(byte)
    }

    fn written(&self) -> usize {
        (**self).written()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_buf_fills_then_overflows() {
        let mut storage = [0u8; 2];
        let mut sink = FixedBuf::new(&mut storage);

        sink.push_byte(0xAA).unwrap();
        sink.push_byte(0xBB).unwrap();
        assert_eq!(sink.remaining(), 0);
        assert_eq!(
            sink.push_byte(0xCC),
            Err(OverflowError::BufferFull { capacity: 2 })
        );

        // A refused byte leaves the sink untouched.
        assert_eq!(sink.written(), 2);
        assert_eq!(sink.filled(), &[0xAA, 0xBB]);
    }

    #[test]
    fn test_zero_capacity() {
        let mut storage: [u8; 0] = [];
        let mut sink = FixedBuf::new(&mut storage);
        assert!(sink.push_byte(1).is_err());
        assert_eq!(sink.written(), 0);
    }

    #[test]
    fn test_clear() {
        let mut storage = [0u8; 1];
        let mut sink = FixedBuf::new(&mut storage);
        sink.push_byte(7).unwrap();
        sink.clear();
        assert_eq!(sink.written(), 0);
        assert_eq!(sink.capacity(), 1);
        sink.push_byte(8).unwrap();
        assert_eq!(sink.filled(), &[8]);
    }

    #[test]
    fn test_vec_sink() {
        let mut v = Vec::new();
        for b in 0..=255u8 {
            v.push_byte(b).unwrap();
        }
        assert_eq!(ByteSink::written(&v), 256);
    }
}
