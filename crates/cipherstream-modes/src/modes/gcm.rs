//! GCM (Galois/Counter Mode) authenticated encryption.
//!
//! CTR-style keystream (forward transform only, trailing-word counter
//! increment) combined with a GHASH accumulator over the associated data and
//! ciphertext, per NIST SP 800-38D. After the last `encrypt`/`decrypt` call,
//! `after_finish` folds the length block, derives the tag, and — when
//! decrypting — verifies it in constant time. A `false` result means every
//! already-emitted plaintext byte is unauthenticated and must be discarded
//! by the caller.

use cipherstream_types::{CryptoError, ModeStatus};
use subtle::ConstantTimeEq;

use crate::buffer::ByteBuffer;
use crate::ghash::{self, GfBlock, GhashKey};
use crate::provider::BlockTransform;
use crate::util;

const GCM_BLOCK_SIZE: usize = 16;

/// Direction of a GCM stream; decryption carries the claimed tag.
#[derive(Debug, Clone)]
pub enum GcmOp {
    Encrypt,
    Decrypt { tag: Vec<u8> },
}

/// Per-stream GCM configuration.
#[derive(Debug, Clone)]
pub struct GcmConfig {
    /// Nonce; any non-empty length, 12 bytes being the fast path.
    pub iv: Vec<u8>,
    /// Authenticated but not encrypted.
    pub additional_data: Vec<u8>,
    /// Tag length in bits; a positive multiple of 8, at most 128.
    pub tag_length: usize,
    pub op: GcmOp,
}

impl GcmConfig {
    pub fn encrypt(iv: &[u8]) -> Self {
        Self {
            iv: iv.to_vec(),
            additional_data: Vec::new(),
            tag_length: 128,
            op: GcmOp::Encrypt,
        }
    }

    pub fn decrypt(iv: &[u8], tag: &[u8]) -> Self {
        Self {
            iv: iv.to_vec(),
            additional_data: Vec::new(),
            tag_length: 128,
            op: GcmOp::Decrypt { tag: tag.to_vec() },
        }
    }

    pub fn with_additional_data(mut self, aad: &[u8]) -> Self {
        self.additional_data = aad.to_vec();
        self
    }

    pub fn with_tag_length(mut self, bits: usize) -> Self {
        self.tag_length = bits;
        self
    }
}

/// Live state of one GCM stream.
struct GcmStream {
    hash_key: GhashKey,
    s: GfBlock,
    j0: GfBlock,
    counter: GfBlock,
    keystream: GfBlock,
    aad_bits: u64,
    /// True ciphertext bytes processed, excluding hash-only zero padding.
    cipher_length: u64,
    tag_length: usize,
    expected_tag: Option<Vec<u8>>,
    partial_bytes: usize,
    tag: Vec<u8>,
}

pub struct GcmMode<C: BlockTransform> {
    cipher: C,
    stream: Option<GcmStream>,
}

impl<C: BlockTransform> GcmMode<C> {
    /// Bind a mode instance to a fixed-key forward transform. GHASH is
    /// defined over 128-bit blocks, so the primitive's block size must be 16.
    pub fn new(cipher: C) -> Result<Self, CryptoError> {
        if cipher.block_size() != GCM_BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockSize);
        }
        Ok(Self {
            cipher,
            stream: None,
        })
    }

    pub fn block_size(&self) -> usize {
        GCM_BLOCK_SIZE
    }

    /// Begin a new logical stream: derive the hash subkey, build the
    /// multiplication table, derive the pre-counter block J0, and fold the
    /// associated data into the accumulator.
    pub fn start(&mut self, config: GcmConfig) -> Result<(), CryptoError> {
        if config.iv.is_empty() {
            return Err(CryptoError::MissingIv);
        }
        if config.tag_length == 0 || config.tag_length % 8 != 0 || config.tag_length > 128 {
            return Err(CryptoError::InvalidTagLength);
        }
        let expected_tag = match config.op {
            GcmOp::Encrypt => None,
            GcmOp::Decrypt { tag } => {
                if tag.len() != config.tag_length / 8 {
                    return Err(CryptoError::InvalidTagLength);
                }
                Some(tag)
            }
        };

        // hash subkey H = Cipher(0^128)
        let zero = [0u32; 4];
        let mut h = [0u32; 4];
        self.cipher.transform(&zero, &mut h);
        let hash_key = GhashKey::new(&h);

        let j0 = if config.iv.len() == 12 {
            // J0 = IV || 0^31 || 1
            let mut j = ghash::block_from_bytes(&config.iv);
            j[3] = 1;
            j
        } else {
            // GHASH-fold the zero-padded IV, then a block with its bit length
            let mut j = [0u32; 4];
            for chunk in config.iv.chunks(GCM_BLOCK_SIZE) {
                hash_key.ghash(&mut j, &ghash::block_from_bytes(chunk));
            }
            let bits = util::from_64_to_32(config.iv.len() as u64 * 8);
            hash_key.ghash(&mut j, &[0, 0, bits[0], bits[1]]);
            j
        };
        let mut counter = j0;
        util::inc32(&mut counter);

        let mut s = [0u32; 4];
        for chunk in config.additional_data.chunks(GCM_BLOCK_SIZE) {
            hash_key.ghash(&mut s, &ghash::block_from_bytes(chunk));
        }

        self.stream = Some(GcmStream {
            hash_key,
            s,
            j0,
            counter,
            keystream: [0; 4],
            aad_bits: config.additional_data.len() as u64 * 8,
            cipher_length: 0,
            tag_length: config.tag_length,
            expected_tag,
            partial_bytes: 0,
            tag: Vec::new(),
        });
        Ok(())
    }

    pub fn encrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        let st = self.stream.as_mut().ok_or(CryptoError::MissingIv)?;
        loop {
            let avail = input.len();
            if avail == 0 {
                return Ok(if is_final {
                    ModeStatus::Complete
                } else {
                    ModeStatus::AwaitingInput
                });
            }
            self.cipher.transform(&st.counter, &mut st.keystream);

            if st.partial_bytes == 0 && avail >= GCM_BLOCK_SIZE {
                let mut ct = [0u32; 4];
                for (i, c) in ct.iter_mut().enumerate() {
                    *c = input.get_u32()? ^ st.keystream[i];
                    output.put_u32(*c);
                }
                st.hash_key.ghash(&mut st.s, &ct);
                util::inc32(&mut st.counter);
                st.cipher_length += GCM_BLOCK_SIZE as u64;
                continue;
            }

            let take = avail.min(GCM_BLOCK_SIZE);
            let consumed = input.get_bytes(take);
            let ks = ghash::block_to_bytes(&st.keystream);
            let produced: Vec<u8> = consumed.iter().zip(ks.iter()).map(|(b, k)| b ^ k).collect();

            if take < GCM_BLOCK_SIZE && !is_final {
                // not a whole block yet: emit the new bytes, rewind so the
                // same keystream block is reprocessed; nothing is hashed and
                // the counter stays put until the block completes
                output.put_bytes(&produced[st.partial_bytes..]);
                input.rewind(take);
                st.partial_bytes = take;
                return Ok(ModeStatus::AwaitingInput);
            }

            // carried block completed, or the final partial block: hash the
            // ciphertext zero-padded to a whole block, count only true bytes
            st.hash_key.ghash(&mut st.s, &ghash::block_from_bytes(&produced));
            util::inc32(&mut st.counter);
            st.cipher_length += take as u64;
            output.put_bytes(&produced[st.partial_bytes..]);
            st.partial_bytes = 0;

            if take < GCM_BLOCK_SIZE {
                return Ok(ModeStatus::Complete);
            }
        }
    }

    pub fn decrypt(
        &mut self,
        input: &mut ByteBuffer,
        output: &mut ByteBuffer,
        is_final: bool,
    ) -> Result<ModeStatus, CryptoError> {
        let st = self.stream.as_mut().ok_or(CryptoError::MissingIv)?;
        loop {
            let avail = input.len();
            // decrypt never carries a partial block: it waits for a whole
            // block unless the stream is ending
            if avail < GCM_BLOCK_SIZE && !(is_final && avail > 0) {
                return Ok(if is_final {
                    ModeStatus::Complete
                } else {
                    ModeStatus::AwaitingInput
                });
            }
            self.cipher.transform(&st.counter, &mut st.keystream);
            util::inc32(&mut st.counter);

            let take = avail.min(GCM_BLOCK_SIZE);
            let consumed = input.get_bytes(take);
            st.hash_key
                .ghash(&mut st.s, &ghash::block_from_bytes(&consumed));

            let ks = ghash::block_to_bytes(&st.keystream);
            let produced: Vec<u8> = consumed.iter().zip(ks.iter()).map(|(b, k)| b ^ k).collect();
            output.put_bytes(&produced);
            st.cipher_length += take as u64;

            if take < GCM_BLOCK_SIZE {
                return Ok(ModeStatus::Complete);
            }
        }
    }

    /// Fold the length block, derive the tag, and verify it when decrypting.
    ///
    /// Returns `false` on tag mismatch (constant-time comparison) or when no
    /// stream was started. The computed tag is available via [`Self::tag`]
    /// either way.
    pub fn after_finish(&mut self) -> bool {
        let Some(st) = self.stream.as_mut() else {
            return false;
        };

        // lengths block: bitlen(AAD) || bitlen(ciphertext)
        let aad = util::from_64_to_32(st.aad_bits);
        let ct = util::from_64_to_32(st.cipher_length * 8);
        st.hash_key.ghash(&mut st.s, &[aad[0], aad[1], ct[0], ct[1]]);

        let mut e_j0 = [0u32; 4];
        self.cipher.transform(&st.j0, &mut e_j0);
        let mut tag_block = st.s;
        for (t, e) in tag_block.iter_mut().zip(e_j0.iter()) {
            *t ^= e;
        }
        st.tag = ghash::block_to_bytes(&tag_block)[..st.tag_length / 8].to_vec();

        match &st.expected_tag {
            None => true,
            Some(expected) => expected.as_slice().ct_eq(&st.tag).into(),
        }
    }

    /// The tag computed by the last `after_finish`; empty before that.
    pub fn tag(&self) -> &[u8] {
        self.stream.as_ref().map_or(&[], |st| st.tag.as_slice())
    }
}
