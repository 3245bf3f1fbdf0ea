//! # sessionhub-cipher
//!
//! Reversible protection for the client hardware address stored on every
//! session record.
//!
//! A single [`CipherContext`] holds the process-lifetime RSA key pair. It is
//! built once at startup, wrapped in `Arc`, and handed to whatever needs to
//! encrypt or decrypt; the key material is never mutated afterwards.

pub mod context;

pub use context::CipherContext;
