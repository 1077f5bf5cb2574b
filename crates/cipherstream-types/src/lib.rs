#![forbid(unsafe_code)]
#![doc = "Common types, error codes, and mode identifiers for cipherstream."]

pub mod error;
pub mod mode;

pub use error::*;
pub use mode::*;
