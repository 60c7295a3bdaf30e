//! Password-based key derivation.
//!
//! The default is PBKDF2-HMAC-SHA256; Argon2id is available as a
//! memory-hard alternative.  Whatever parameters were used travel with
//! the envelope, so raising the defaults never locks out older vaults.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::keys::{DerivedKey, KEY_LEN};
use crate::errors::{LockboxError, Result};

/// Length of the per-save salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Policy floor for new PBKDF2 vaults.
pub const MIN_PBKDF2_ITERATIONS: u32 = 300_000;

/// Default PBKDF2 iteration count for new vaults.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 600_000;

/// Upper bound on PBKDF2 iterations accepted from a file, so a hostile
/// envelope cannot pin the CPU for hours.
const MAX_ITERATIONS: u32 = 10_000_000;

/// Upper bound on Argon2 passes accepted from a file.  Each pass walks
/// the whole memory block, so this is far lower than the PBKDF2 cap.
const MAX_ARGON2_ITERATIONS: u32 = 64;

/// Minimum safe Argon2 memory cost in KiB (8 MB).
const MIN_ARGON2_MEMORY_KIB: u32 = 8_192;

/// Maximum Argon2 memory cost accepted from a file (1 GB).
const MAX_ARGON2_MEMORY_KIB: u32 = 1024 * 1024;

const MAX_ARGON2_PARALLELISM: u32 = 64;

/// KDF algorithm and cost parameters, stored in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm")]
pub enum KdfParams {
    #[serde(rename = "pbkdf2-sha256")]
    Pbkdf2Sha256 { iterations: u32 },

    #[serde(rename = "argon2id")]
    Argon2id {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::Pbkdf2Sha256 {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl KdfParams {
    /// Argon2id defaults: 64 MB, 3 passes, 4 lanes.
    pub fn argon2id_default() -> Self {
        Self::Argon2id {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }

    /// Short human-readable name of the algorithm.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::Pbkdf2Sha256 { .. } => "pbkdf2-sha256",
            Self::Argon2id { .. } => "argon2id",
        }
    }

    /// Sanity bounds for parameters read back from a vault file.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Pbkdf2Sha256 { iterations } => {
                if iterations == 0 || iterations > MAX_ITERATIONS {
                    return Err(LockboxError::KeyDerivationFailed(format!(
                        "PBKDF2 iterations out of range: {iterations}"
                    )));
                }
            }
            Self::Argon2id {
                memory_kib,
                iterations,
                parallelism,
            } => {
                if !(MIN_ARGON2_MEMORY_KIB..=MAX_ARGON2_MEMORY_KIB).contains(&memory_kib) {
                    return Err(LockboxError::KeyDerivationFailed(format!(
                        "Argon2 memory_kib out of range: {memory_kib}"
                    )));
                }
                if iterations == 0 || iterations > MAX_ARGON2_ITERATIONS {
                    return Err(LockboxError::KeyDerivationFailed(format!(
                        "Argon2 iterations out of range: {iterations}"
                    )));
                }
                if parallelism == 0 || parallelism > MAX_ARGON2_PARALLELISM {
                    return Err(LockboxError::KeyDerivationFailed(format!(
                        "Argon2 parallelism out of range: {parallelism}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Stricter check applied to parameters used for new saves.
    pub fn check_policy(&self) -> Result<()> {
        self.validate()?;
        if let Self::Pbkdf2Sha256 { iterations } = *self {
            if iterations < MIN_PBKDF2_ITERATIONS {
                return Err(LockboxError::KeyDerivationFailed(format!(
                    "PBKDF2 iterations must be at least {MIN_PBKDF2_ITERATIONS} (got {iterations})"
                )));
            }
        }
        Ok(())
    }
}

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt + params always produce the same key.
/// PBKDF2 cannot fail; Argon2id fails only on parameters its library
/// rejects.
pub fn derive_key(password: &[u8], salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    let mut key = DerivedKey::zeroed();

    match *params {
        KdfParams::Pbkdf2Sha256 { iterations } => {
            pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, key.as_mut_bytes());
        }
        KdfParams::Argon2id {
            memory_kib,
            iterations,
            parallelism,
        } => {
            let params = Params::new(memory_kib, iterations, parallelism, Some(KEY_LEN))
                .map_err(|e| {
                    LockboxError::KeyDerivationFailed(format!("invalid Argon2 params: {e}"))
                })?;

            Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
                .hash_password_into(password, salt, key.as_mut_bytes())
                .map_err(|e| {
                    LockboxError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
                })?;
        }
    }

    Ok(key)
}

/// Generate a fresh random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
