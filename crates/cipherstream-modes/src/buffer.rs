//! Growable byte buffer with a movable read cursor.
//!
//! Modes consume their input through this abstraction: whole 32-bit words
//! are read big-endian, and the cursor can be rewound to re-expose bytes
//! that were read but could not yet be processed as a full block. Callers
//! append new chunks to the same buffer between streaming calls.

use cipherstream_types::CryptoError;

/// A byte sequence with an append-only tail and a read cursor.
#[derive(Debug, Default, Clone)]
pub struct ByteBuffer {
    data: Vec<u8>,
    read: usize,
}

impl ByteBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding a copy of `bytes`, cursor at the start.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
            read: 0,
        }
    }

    /// Number of unread bytes.
    pub fn len(&self) -> usize {
        self.data.len() - self.read
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at offset `i` from the read cursor.
    ///
    /// Panics when `i` is out of range, like slice indexing.
    pub fn at(&self, i: usize) -> u8 {
        self.data[self.read + i]
    }

    /// Read a big-endian 32-bit word, advancing the cursor by 4.
    pub fn get_u32(&mut self) -> Result<u32, CryptoError> {
        if self.len() < 4 {
            return Err(CryptoError::BufferTooSmall {
                need: 4,
                got: self.len(),
            });
        }
        let b = &self.data[self.read..self.read + 4];
        self.read += 4;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Append a 32-bit word as 4 big-endian bytes.
    pub fn put_u32(&mut self, v: u32) {
        self.data.extend_from_slice(&v.to_be_bytes());
    }

    /// Read up to `n` bytes, advancing the cursor. Returns fewer when the
    /// buffer runs out.
    pub fn get_bytes(&mut self, n: usize) -> Vec<u8> {
        let take = n.min(self.len());
        let out = self.data[self.read..self.read + take].to_vec();
        self.read += take;
        out
    }

    /// Append raw bytes.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append `count` copies of `value`.
    pub fn fill_with_byte(&mut self, value: u8, count: usize) {
        self.data.resize(self.data.len() + count, value);
    }

    /// Drop `n` bytes from the unread tail. Never removes already-consumed
    /// bytes; trims at most `len()`.
    pub fn truncate(&mut self, n: usize) {
        let drop = n.min(self.len());
        self.data.truncate(self.data.len() - drop);
    }

    /// Move the read cursor back `n` bytes, re-exposing consumed input.
    /// Capped at the start of the buffer.
    pub fn rewind(&mut self, n: usize) {
        self.read -= n.min(self.read);
    }

    /// Discard everything, consumed and unread alike.
    pub fn clear(&mut self) {
        self.data.clear();
        self.read = 0;
    }

    /// The unread bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data[self.read..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_round_trip_is_big_endian() {
        let mut buf = ByteBuffer::new();
        buf.put_u32(0x0102_0304);
        assert_eq!(buf.bytes(), &[1, 2, 3, 4]);
        assert_eq!(buf.get_u32().unwrap(), 0x0102_0304);
        assert!(buf.is_empty());
    }

    #[test]
    fn get_u32_reports_shortfall() {
        let mut buf = ByteBuffer::from_bytes(&[1, 2, 3]);
        assert!(matches!(
            buf.get_u32(),
            Err(CryptoError::BufferTooSmall { need: 4, got: 3 })
        ));
        // cursor unchanged on failure
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn rewind_re_exposes_consumed_bytes() {
        let mut buf = ByteBuffer::from_bytes(b"abcdef");
        assert_eq!(buf.get_bytes(4), b"abcd");
        buf.rewind(2);
        assert_eq!(buf.get_bytes(4), b"cdef");
        // rewind past the start is capped
        buf.rewind(100);
        assert_eq!(buf.len(), 6);
    }

    #[test]
    fn truncate_only_touches_unread_tail() {
        let mut buf = ByteBuffer::from_bytes(b"abcdef");
        buf.get_bytes(2);
        buf.truncate(3);
        assert_eq!(buf.bytes(), b"c");
        // trimming more than remains stops at the cursor
        buf.truncate(10);
        assert!(buf.is_empty());
    }

    #[test]
    fn get_bytes_returns_what_is_available() {
        let mut buf = ByteBuffer::from_bytes(b"xy");
        assert_eq!(buf.get_bytes(5), b"xy");
        assert!(buf.get_bytes(5).is_empty());
    }

    #[test]
    fn fill_with_byte_appends_repeats() {
        let mut buf = ByteBuffer::from_bytes(b"a");
        buf.fill_with_byte(7, 3);
        assert_eq!(buf.bytes(), &[b'a', 7, 7, 7]);
    }

    #[test]
    fn at_indexes_from_cursor() {
        let mut buf = ByteBuffer::from_bytes(b"abc");
        buf.get_bytes(1);
        assert_eq!(buf.at(0), b'b');
        assert_eq!(buf.at(1), b'c');
    }

    #[test]
    fn appends_interleave_with_reads() {
        let mut buf = ByteBuffer::new();
        buf.put_bytes(b"abc");
        assert_eq!(buf.get_bytes(2), b"ab");
        buf.put_bytes(b"de");
        assert_eq!(buf.get_bytes(3), b"cde");
    }
}
