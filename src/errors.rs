use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Lockbox.
#[derive(Debug, Error)]
pub enum LockboxError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Wrong key or modified ciphertext. Never surfaced to users directly.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault not found at {0} (run `lockbox init` first)")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    AlreadyExists(PathBuf),

    /// Wrong password and a damaged file deliberately share this variant.
    #[error("Unable to unlock vault: wrong password or corrupted vault file")]
    UnlockFailed,

    /// Internal to the codec; `VaultStore::unlock` folds it into `UnlockFailed`.
    #[error("Malformed vault envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Entry '{0}' already exists (use --force to overwrite)")]
    EntryExists(String),

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Invalid entry name: {0}")]
    InvalidEntryName(String),

    // --- Storage errors ---
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- Config errors ---
    #[error("Config error: {0}")]
    Config(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl LockboxError {
    /// Wrap an I/O error with the path it happened on.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for Lockbox results.
pub type Result<T> = std::result::Result<T, LockboxError>;
