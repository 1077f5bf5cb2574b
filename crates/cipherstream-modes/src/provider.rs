//! Trait-based seam between the mode layer and the block cipher primitive.
//!
//! A mode never schedules keys or chooses a direction; it is handed a
//! fixed-key transform and applies it block by block.

/// One direction of a fixed-key block cipher.
///
/// Streaming modes (CFB, OFB, CTR, GCM) always take the forward transform,
/// even when decrypting. ECB and CBC decryption take a primitive that embeds
/// the inverse transform instead; the mode itself is direction-agnostic.
///
/// Implementations must be pure and reentrant for their lifetime: the same
/// input block always yields the same output block, with no observable state
/// between calls. That is what allows several mode instances to share one
/// primitive.
pub trait BlockTransform {
    /// Block size in bytes. Must be a non-zero multiple of 4.
    fn block_size(&self) -> usize;

    /// Transform one block of big-endian 32-bit words.
    ///
    /// `input` and `output` each hold `block_size() / 4` words.
    fn transform(&self, input: &[u32], output: &mut [u32]);
}

impl<T: BlockTransform + ?Sized> BlockTransform for &T {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn transform(&self, input: &[u32], output: &mut [u32]) {
        (**self).transform(input, output)
    }
}
