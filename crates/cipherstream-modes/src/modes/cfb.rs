//! CFB (Cipher Feedback) mode of operation.
//!
//! The state block (IV at first) is encrypted to produce a keystream block;
//! ciphertext feeds back as the next state, so the construction
//! self-synchronizes after one block. Only the forward cipher transform is
//! used, for both directions.

use cipherstream_types::{CryptoError, ModeStatus};

use crate::buffer::ByteBuffer;
use crate::modes::keystream::{Feedback, KeystreamEngine};
use crate::provider::BlockTransform;
use crate::util::Iv;

pub struct CfbMode<C: BlockTransform> {
    engine: KeystreamEngine<C>,
}

impl<C: BlockTransform> CfbMode<C> {
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

    pub fn encrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        self.engine
            .apply(Feedback::ProducedCiphertext, input, output, is_final)
    }

    pub fn decrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        self.engine
            .apply(Feedback::ConsumedCiphertext, input, output, is_final)
    }
}
