//! PKCS#7 padding for the block-aligned modes (ECB, CBC).

use crate::buffer::ByteBuffer;

/// Append PKCS#7 padding: `n` bytes of value `n`, where `n` is the distance
/// to the next block boundary (a full extra block when already aligned).
/// Always succeeds; the return value mirrors `pkcs7_unpad` for callers that
/// treat both directions uniformly.
pub fn pkcs7_pad(input: &mut ByteBuffer, block_size: usize) -> bool {
    let overflow = input.len() % block_size;
    let padding = if overflow == 0 {
        block_size
    } else {
        block_size - overflow
    };
    input.fill_with_byte(padding as u8, padding);
    true
}

/// Strip PKCS#7 padding from the tail of `output`.
///
/// `overflow` is the non-block-aligned remainder the caller observed while
/// decrypting; any nonzero value means the ciphertext was malformed. Returns
/// `false` on malformed input: a non-aligned leftover, an empty buffer, or a
/// padding count larger than one block. Padding byte *values* are not
/// inspected, only the trailing count.
pub fn pkcs7_unpad(output: &mut ByteBuffer, block_size: usize, overflow: usize) -> bool {
    if overflow > 0 {
        return false;
    }
    let len = output.len();
    if len == 0 {
        return false;
    }
    let count = output.at(len - 1) as usize;
    if count > block_size {
        return false;
    }
    output.truncate(count);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_fills_to_the_boundary() {
        let mut buf = ByteBuffer::from_bytes(b"abc");
        assert!(pkcs7_pad(&mut buf, 8));
        assert_eq!(buf.bytes(), b"abc\x05\x05\x05\x05\x05");
    }

    #[test]
    fn pad_aligned_input_gets_a_full_block() {
        let mut buf = ByteBuffer::from_bytes(&[0u8; 16]);
        assert!(pkcs7_pad(&mut buf, 16));
        assert_eq!(buf.len(), 32);
        assert_eq!(buf.at(31), 16);
    }

    #[test]
    fn unpad_reverses_pad_for_every_length() {
        for len in 0..48 {
            let msg: Vec<u8> = (0..len as u8).collect();
            let mut buf = ByteBuffer::from_bytes(&msg);
            pkcs7_pad(&mut buf, 16);
            assert_eq!(buf.len() % 16, 0);
            assert!(buf.len() > msg.len());
            assert!(pkcs7_unpad(&mut buf, 16, 0));
            assert_eq!(buf.bytes(), &msg[..]);
        }
    }

    #[test]
    fn unpad_rejects_overflow() {
        let mut buf = ByteBuffer::from_bytes(&[1u8; 16]);
        assert!(!pkcs7_unpad(&mut buf, 16, 3));
    }

    #[test]
    fn unpad_rejects_count_beyond_one_block() {
        let mut buf = ByteBuffer::from_bytes(&[0u8, 0, 17]);
        assert!(!pkcs7_unpad(&mut buf, 16, 0));
    }

    #[test]
    fn unpad_rejects_empty_buffer() {
        let mut buf = ByteBuffer::new();
        assert!(!pkcs7_unpad(&mut buf, 16, 0));
    }
}
