//! IV normalization, counter increment, and length-field helpers.

use cipherstream_types::CryptoError;

use crate::buffer::ByteBuffer;

/// An initialization vector in any of its accepted representations.
#[derive(Debug, Clone)]
pub enum Iv {
    /// Raw big-endian bytes; must be exactly one block long.
    Bytes(Vec<u8>),
    /// Pre-split big-endian 32-bit words; must be one block's worth.
    Words(Vec<u32>),
}

impl From<&[u8]> for Iv {
    fn from(bytes: &[u8]) -> Self {
        Iv::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Iv {
    fn from(bytes: Vec<u8>) -> Self {
        Iv::Bytes(bytes)
    }
}

impl From<&str> for Iv {
    fn from(s: &str) -> Self {
        Iv::Bytes(s.as_bytes().to_vec())
    }
}

impl From<Vec<u32>> for Iv {
    fn from(words: Vec<u32>) -> Self {
        Iv::Words(words)
    }
}

/// Normalize an IV to one block of big-endian 32-bit words.
pub fn transform_iv(iv: &Iv, words_per_block: usize) -> Result<Vec<u32>, CryptoError> {
    match iv {
        Iv::Bytes(b) => {
            if b.len() != words_per_block * 4 {
                return Err(CryptoError::InvalidIvLength);
            }
            Ok(b
                .chunks_exact(4)
                .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                .collect())
        }
        Iv::Words(w) => {
            if w.len() != words_per_block {
                return Err(CryptoError::InvalidIvLength);
            }
            Ok(w.clone())
        }
    }
}

/// Increment only the trailing 32-bit word of a block, wrapping mod 2^32.
///
/// No carry is propagated into earlier words; existing CTR/GCM ciphertexts
/// depend on this exact behavior.
pub fn inc32(block: &mut [u32]) {
    if let Some(last) = block.last_mut() {
        *last = last.wrapping_add(1);
    }
}

/// Split a 64-bit value into two big-endian 32-bit words.
pub fn from_64_to_32(n: u64) -> [u32; 2] {
    [(n >> 32) as u32, n as u32]
}

/// Append a run of words to `out` big-endian.
pub(crate) fn put_words(out: &mut ByteBuffer, words: &[u32]) {
    for &w in words {
        out.put_u32(w);
    }
}

/// Pack bytes into big-endian words, zero-padding to `words_per_block`.
pub(crate) fn bytes_to_words_padded(bytes: &[u8], words_per_block: usize) -> Vec<u32> {
    let mut words = vec![0u32; words_per_block];
    for (i, &b) in bytes.iter().enumerate() {
        words[i / 4] |= u32::from(b) << (8 * (3 - (i % 4)));
    }
    words
}

/// Unpack words into big-endian bytes.
pub(crate) fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}
