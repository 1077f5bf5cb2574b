#![forbid(unsafe_code)]
#![doc = "Streaming block-cipher modes of operation for cipherstream."]

// Cipher primitive seam
pub mod provider;

// Byte-stream plumbing
pub mod buffer;
pub mod padding;
pub mod util;

// GF(2^128) engine for GCM authentication
pub mod ghash;

// Modes of operation
pub mod modes;

// Reference block transform (software AES)
pub mod aes;
