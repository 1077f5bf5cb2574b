//! OFB (Output Feedback) mode of operation.
//!
//! The keystream is generated by repeatedly encrypting the previous
//! keystream block (the IV at first), independent of the data. Encryption
//! and decryption are the same XOR, exposed as one keystream application
//! under both names.

use cipherstream_types::{CryptoError, ModeStatus};

use crate::buffer::ByteBuffer;
use crate::modes::keystream::{Feedback, KeystreamEngine};
use crate::provider::BlockTransform;
use crate::util::Iv;

pub struct OfbMode<C: BlockTransform> {
    engine: KeystreamEngine<C>,
}

impl<C: BlockTransform> OfbMode<C> {
    pub fn new(cipher: C) -> Self {
        Self {
            engine: KeystreamEngine::new(cipher),
        }
    }

    pub fn block_size(&self) -> usize {
        self.engine.block_size()
    }

    /// Begin a new logical stream seeded by `iv`.
    pub fn start(&mut self, iv: &Iv) -> Result<(), CryptoError> {
        self.engine.start(iv)
    }

    /// XOR the keystream into the buffered input; direction-agnostic.
    pub fn apply_keystream(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        self.engine.apply(Feedback::Keystream, input, output, is_final)
    }

    pub fn encrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        self.apply_keystream(input, output, is_final)
    }

    pub fn decrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        self.apply_keystream(input, output, is_final)
    }
}
