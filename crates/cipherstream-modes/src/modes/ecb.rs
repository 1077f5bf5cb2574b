//! ECB (Electronic Codebook) mode of operation.
//!
//! Every block is transformed independently, with no chaining. Callers must
//! pad the stream to a block boundary before the final call; `pad`/`unpad`
//! implement PKCS#7 for that purpose.

use cipherstream_types::{CryptoError, ModeStatus};

use crate::buffer::ByteBuffer;
use crate::padding::{pkcs7_pad, pkcs7_unpad};
use crate::provider::BlockTransform;
use crate::util;

pub struct EcbMode<C: BlockTransform> {
    cipher: C,
    block_size: usize,
    in_block: Vec<u32>,
    out_block: Vec<u32>,
}

impl<C: BlockTransform> EcbMode<C> {
    /// Bind a mode instance to a fixed-key primitive. For decryption, bind
    /// the primitive embedding the inverse transform.
    pub fn new(cipher: C) -> Self {
        let block_size = cipher.block_size();
        let words = block_size / 4;
        Self {
            cipher,
            block_size,
            in_block: vec![0; words],
            out_block: vec![0; words],
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Begin a new logical stream. ECB carries no per-stream state; this
    /// exists so all modes share one calling sequence.
    pub fn start(&mut self) {}

    pub fn encrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        self.process(input, output, is_final)
    }

    pub fn decrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        self.process(input, output, is_final)
    }

    fn process(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        loop {
            if input.len() < self.block_size {
                return if input.is_empty() {
                    Ok(if is_final {
                        ModeStatus::Complete
                    } else {
                        ModeStatus::AwaitingInput
                    })
                } else if is_final {
                    // the caller was required to pad first
                    Err(CryptoError::UnalignedInput)
                } else {
                    Ok(ModeStatus::AwaitingInput)
                };
            }
            for w in self.in_block.iter_mut() {
                *w = input.get_u32()?;
            }
            self.cipher.transform(&self.in_block, &mut self.out_block);
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
