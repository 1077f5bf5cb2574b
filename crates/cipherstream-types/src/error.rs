/// Errors from the mode-of-operation layer.
///
/// Only configuration and misuse problems surface here; data-dependent
/// failures (an unusable padding byte, a GCM tag mismatch) are reported as
/// boolean results so that callers can treat them as decode failures.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("invalid key")]
    InvalidKey,
    #[error("block size not supported by this mode")]
    InvalidBlockSize,

    // Buffer errors
    #[error("buffer length not enough: need {need}, got {got}")]
    BufferTooSmall { need: usize, got: usize },

    // Streaming errors
    #[error("final input not aligned to the cipher block size")]
    UnalignedInput,

    // Stream configuration errors
    #[error("missing iv")]
    MissingIv,
    #[error("invalid iv length")]
    InvalidIvLength,
    #[error("authentication tag does not match tag length")]
    InvalidTagLength,
}
