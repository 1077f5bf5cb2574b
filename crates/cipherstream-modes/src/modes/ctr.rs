//! CTR (Counter) mode of operation.
//!
//! The keystream block for counter value `n` is the cipher applied to the IV
//! block with its trailing 32-bit word set to `base + n`. Only that trailing
//! word is incremented, wrapping mod 2^32 without carrying into earlier
//! words; existing ciphertexts depend on this exact behavior. Encryption and
//! decryption are the same XOR, exposed as one keystream application under
//! both names.

use cipherstream_types::{CryptoError, ModeStatus};

use crate::buffer::ByteBuffer;
use crate::modes::keystream::{Feedback, KeystreamEngine};
use crate::provider::BlockTransform;
use crate::util::Iv;

pub struct CtrMode<C: BlockTransform> {
    engine: KeystreamEngine<C>,
}

impl<C: BlockTransform> CtrMode<C> {
    pub fn new(cipher: C) -> Self {
        Self {
            engine: KeystreamEngine::new(cipher),
        }
    }

    pub fn block_size(&self) -> usize {
        self.engine.block_size()
    }

    /// Begin a new logical stream; `iv` is the initial counter block.
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
        self.engine.apply(Feedback::Counter, input, output, is_final)
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
