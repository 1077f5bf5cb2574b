//! Block-cipher modes of operation.
//!
//! Each mode is a struct generic over a
//! [`BlockTransform`](crate::provider::BlockTransform) primitive, owning
//! one logical stream's mutable state. `start` begins a stream, then
//! `encrypt`/`decrypt` are called with successive input chunks and a final
//! flag; a call drains every whole block currently buffered and returns
//! [`ModeStatus::AwaitingInput`](cipherstream_types::ModeStatus) once fewer
//! than a block remains (non-final) or
//! [`ModeStatus::Complete`](cipherstream_types::ModeStatus) on the final
//! call. GCM additionally exposes `after_finish` to derive or verify the
//! authentication tag.
//!
//! Instances are single-stream: one instance must never serve two streams
//! concurrently. Several instances may share one primitive through the
//! blanket `&T` implementation of the trait.

mod keystream;

pub mod cbc;
pub mod cfb;
pub mod ctr;
pub mod ecb;
pub mod gcm;
pub mod ofb;

pub use cbc::CbcMode;
pub use cfb::CfbMode;
pub use ctr::CtrMode;
pub use ecb::EcbMode;
pub use gcm::{GcmConfig, GcmMode, GcmOp};
pub use ofb::OfbMode;
