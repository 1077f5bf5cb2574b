//! CBC (Cipher Block Chaining) mode of operation.
//!
//! Each plaintext block is XORed with the previous ciphertext block (the IV
//! for the first block) before the cipher is applied. Callers must pad the
//! stream to a block boundary before the final call; `pad`/`unpad` implement
//! PKCS#7.
//!
//! Starting a stream without an IV reuses the previous stream's final block
//! as the new IV. That behavior is insecure but some deployed ciphertexts
//! depend on it, so it is preserved bit-for-bit; it fails when no prior
//! block exists on the instance.

use cipherstream_types::{CryptoError, ModeStatus};

use crate::buffer::ByteBuffer;
use crate::padding::{pkcs7_pad, pkcs7_unpad};
use crate::provider::BlockTransform;
use crate::util::{self, transform_iv, Iv};

pub struct CbcMode<C: BlockTransform> {
    cipher: C,
    block_size: usize,
    words_per_block: usize,
    in_block: Vec<u32>,
    out_block: Vec<u32>,
    // survives start() so a legacy IV-less stream can chain off it
    prev: Option<Vec<u32>>,
}

impl<C: BlockTransform> CbcMode<C> {
    /// Bind a mode instance to a fixed-key primitive. For decryption, bind
    /// the primitive embedding the inverse transform.
    pub fn new(cipher: C) -> Self {
        let block_size = cipher.block_size();
        let words = block_size / 4;
        Self {
            cipher,
            block_size,
            words_per_block: words,
            in_block: vec![0; words],
            out_block: vec![0; words],
            prev: None,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Begin a new logical stream. `None` requests legacy residue reuse:
    /// the previous stream's final block becomes the IV.
    pub fn start(&mut self, iv: Option<&Iv>) -> Result<(), CryptoError> {
        match iv {
            Some(iv) => {
                self.prev = Some(transform_iv(iv, self.words_per_block)?);
                Ok(())
            }
            None if self.prev.is_some() => Ok(()),
            None => Err(CryptoError::MissingIv),
        }
    }

    pub fn encrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        let prev = self.prev.as_mut().ok_or(CryptoError::MissingIv)?;
        loop {
            if input.len() < self.block_size {
                return aligned_tail(input, is_final);
            }
            for (i, w) in self.in_block.iter_mut().enumerate() {
                *w = prev[i] ^ input.get_u32()?;
            }
            self.cipher.transform(&self.in_block, &mut self.out_block);
            prev.copy_from_slice(&self.out_block);
            util::put_words(output, &self.out_block);
        }
    }

    pub fn decrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        let prev = self.prev.as_mut().ok_or(CryptoError::MissingIv)?;
        loop {
            if input.len() < self.block_size {
                return aligned_tail(input, is_final);
            }
            for w in self.in_block.iter_mut() {
                *w = input.get_u32()?;
            }
            self.cipher.transform(&self.in_block, &mut self.out_block);
            for (i, w) in self.out_block.iter_mut().enumerate() {
                *w ^= prev[i];
            }
            // the ciphertext block just consumed chains the next one
            prev.copy_from_slice(&self.in_block);
            util::put_words(output, &self.out_block);
        }
    }

    /// PKCS#7-pad `buffer` to the next block boundary.
    pub fn pad(&self, buffer: &mut ByteBuffer) -> bool {
        pkcs7_pad(buffer, self.block_size)
    }

    /// Strip PKCS#7 padding; `overflow` is the caller-observed non-aligned
    /// remainder and must be zero.
    pub fn unpad(&self, buffer: &mut ByteBuffer, overflow: usize) -> bool {
        pkcs7_unpad(buffer, self.block_size, overflow)
    }
}

fn aligned_tail(input: &ByteBuffer, is_final: bool) -> Result<ModeStatus, CryptoError> {
    if input.is_empty() {
        Ok(if is_final {
            ModeStatus::Complete
        } else {
            ModeStatus::AwaitingInput
        })
    } else if is_final {
        Err(CryptoError::UnalignedInput)
    } else {
        Ok(ModeStatus::AwaitingInput)
    }
}
