//! Shared streaming engine for the keystream modes (CFB, OFB, CTR).
//!
//! The three modes differ only in how the evolving state block advances
//! after a block is consumed; everything else — keystream generation,
//! whole-block XOR, and the partial-block carry across calls — is identical
//! and lives here.
//!
//! Partial-block handling: when less than a full block of input is buffered
//! on a non-final call, the available bytes are XORed against the current
//! keystream block and emitted, then the input cursor is rewound so those
//! bytes remain logically unconsumed. The next call regenerates the same
//! keystream block from the unchanged state and emits only the bytes past
//! the recorded carry offset, so output is byte-identical no matter how the
//! caller chunks the stream.

use cipherstream_types::{CryptoError, ModeStatus};

use crate::buffer::ByteBuffer;
use crate::provider::BlockTransform;
use crate::util::{self, transform_iv, Iv};

/// How the state block advances once a block has been consumed.
#[derive(Clone, Copy)]
pub(super) enum Feedback {
    /// Next state is the ciphertext block just produced (CFB encrypt).
    ProducedCiphertext,
    /// Next state is the ciphertext block just consumed (CFB decrypt).
    ConsumedCiphertext,
    /// The keystream block feeds itself back (OFB).
    Keystream,
    /// The state is a counter; bump its trailing word (CTR).
    Counter,
}

pub(super) struct KeystreamEngine<C: BlockTransform> {
    cipher: C,
    block_size: usize,
    words_per_block: usize,
    state: Option<Vec<u32>>,
    keystream: Vec<u32>,
    partial_bytes: usize,
}

impl<C: BlockTransform> KeystreamEngine<C> {
    pub(super) fn new(cipher: C) -> Self {
        let block_size = cipher.block_size();
        let words_per_block = block_size / 4;
        Self {
            cipher,
            block_size,
            words_per_block,
            state: None,
            keystream: vec![0; words_per_block],
            partial_bytes: 0,
        }
    }

    pub(super) fn block_size(&self) -> usize {
        self.block_size
    }

    /// Begin a new logical stream seeded by `iv`.
    pub(super) fn start(&mut self, iv: &Iv) -> Result<(), CryptoError> {
        self.state = Some(transform_iv(iv, self.words_per_block)?);
        self.partial_bytes = 0;
        Ok(())
    }

    /// Apply the keystream to all currently buffered input.
    pub(super) fn apply(
        &mut self,
        feedback: Feedback,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        let state = self.state.as_mut().ok_or(CryptoError::MissingIv)?;
        loop {
            let avail = input.len();
            if avail == 0 {
                return Ok(if is_final {
                    ModeStatus::Complete
                } else {
                    ModeStatus::AwaitingInput
                });
            }
            self.cipher.transform(state, &mut self.keystream);

            if self.partial_bytes == 0 && avail >= self.block_size {
                match feedback {
                    Feedback::ProducedCiphertext => {
                        for i in 0..self.words_per_block {
                            let c = input.get_u32()? ^ self.keystream[i];
                            state[i] = c;
                            output.put_u32(c);
                        }
                    }
                    Feedback::ConsumedCiphertext => {
                        for i in 0..self.words_per_block {
                            let c = input.get_u32()?;
                            state[i] = c;
                            output.put_u32(c ^ self.keystream[i]);
                        }
                    }
                    Feedback::Keystream => {
                        for i in 0..self.words_per_block {
                            output.put_u32(input.get_u32()? ^ self.keystream[i]);
                        }
                        state.copy_from_slice(&self.keystream);
                    }
                    Feedback::Counter => {
                        for i in 0..self.words_per_block {
                            output.put_u32(input.get_u32()? ^ self.keystream[i]);
                        }
                        util::inc32(state);
                    }
                }
                continue;
            }

            // Partial path: XOR whatever is available against the keystream.
            let take = avail.min(self.block_size);
            let consumed = input.get_bytes(take);
            let ks = util::words_to_bytes(&self.keystream);
            let produced: Vec<u8> = consumed.iter().zip(&ks).map(|(b, k)| b ^ k).collect();

            if take < self.block_size && !is_final {
                // Not a whole block yet: emit only the new bytes, rewind so
                // the same keystream block is reprocessed with more input.
                output.put_bytes(&produced[self.partial_bytes..]);
                input.rewind(take);
                self.partial_bytes = take;
                return Ok(ModeStatus::AwaitingInput);
            }

            output.put_bytes(&produced[self.partial_bytes..]);
            self.partial_bytes = 0;

            if take == self.block_size {
                // A carried block just completed; advance and keep draining.
                match feedback {
                    Feedback::ProducedCiphertext => {
                        state.copy_from_slice(&util::bytes_to_words_padded(
                            &produced,
                            self.words_per_block,
                        ));
                    }
                    Feedback::ConsumedCiphertext => {
                        state.copy_from_slice(&util::bytes_to_words_padded(
                            &consumed,
                            self.words_per_block,
                        ));
                    }
                    Feedback::Keystream => state.copy_from_slice(&self.keystream),
                    Feedback::Counter => util::inc32(state),
                }
                continue;
            }

            // Final partial block; the stream ends here.
            return Ok(ModeStatus::Complete);
        }
    }
}
