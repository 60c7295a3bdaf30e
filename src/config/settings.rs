use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::{absolutize, default_config_path};
use crate::crypto::kdf::{KdfParams, DEFAULT_PBKDF2_ITERATIONS};
use crate::errors::{LockboxError, Result};

/// User configuration, loaded from `<lockbox home>/config.toml`.
///
/// Every field has a sensible default so Lockbox works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Vault file, relative to the lockbox home unless absolute.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// KDF for new saves: "pbkdf2-sha256" or "argon2id".
    #[serde(default = "default_kdf")]
    pub kdf: String,

    /// PBKDF2 iteration count (default: 600 000, floor 300 000).
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Length of passwords produced by `generate`.
    #[serde(default = "default_generate_length")]
    pub generate_length: usize,

    /// Whether `generate` includes punctuation.
    #[serde(default = "default_generate_symbols")]
    pub generate_symbols: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    "vault.json".to_string()
}

fn default_kdf() -> String {
    "pbkdf2-sha256".to_string()
}

fn default_pbkdf2_iterations() -> u32 {
    DEFAULT_PBKDF2_ITERATIONS
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_generate_length() -> usize {
    24
}

fn default_generate_symbols() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            kdf: default_kdf(),
            pbkdf2_iterations: default_pbkdf2_iterations(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            generate_length: default_generate_length(),
            generate_symbols: default_generate_symbols(),
        }
    }
}

impl Settings {
    /// Load settings from `<home>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = default_config_path(home);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load settings from an explicitly named file, which must exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            LockboxError::Config(format!("cannot read {}: {e}", config_path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            LockboxError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Full path of the vault file.
    pub fn vault_path(&self, home: &Path) -> PathBuf {
        absolutize(PathBuf::from(&self.vault_file), home)
    }

    /// KDF parameters for new saves, checked against the policy floor.
    pub fn kdf_params(&self) -> Result<KdfParams> {
        let params = match self.kdf.as_str() {
            "pbkdf2-sha256" | "pbkdf2" => KdfParams::Pbkdf2Sha256 {
                iterations: self.pbkdf2_iterations,
            },
            "argon2id" | "argon2" => KdfParams::Argon2id {
                memory_kib: self.argon2_memory_kib,
                iterations: self.argon2_iterations,
                parallelism: self.argon2_parallelism,
            },
            other => {
                return Err(LockboxError::Config(format!(
                    "unknown kdf '{other}' (expected pbkdf2-sha256 or argon2id)"
                )))
            }
        };

        params
            .check_policy()
            .map_err(|e| LockboxError::Config(e.to_string()))?;
        Ok(params)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
