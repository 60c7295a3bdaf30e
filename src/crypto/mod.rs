//! Cryptographic primitives for Lockbox.
//!
//! This module provides:
//! - Password-based key derivation, PBKDF2 or Argon2id (`kdf`)
//! - The zeroizing `DerivedKey` holder (`keys`)
//! - AES-256-GCM seal and open (`encryption`)

pub mod encryption;
pub mod kdf;
pub mod keys;

pub use encryption::{open, seal};
pub use kdf::{derive_key, generate_salt, KdfParams, SALT_LEN};
pub use keys::{DerivedKey, KEY_LEN};
