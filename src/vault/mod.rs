//! Vault module: encrypted entry storage.
//!
//! This module provides:
//! - The in-memory `EntrySet` (`entries`)
//! - The JSON envelope codec (`format`)
//! - `VaultStore` for initializing, unlocking and saving vaults (`store`)

pub mod entries;
pub mod format;
pub mod store;

pub use entries::EntrySet;
pub use format::{decode, encode, Envelope};
pub use store::{PendingSave, VaultState, VaultStore};
