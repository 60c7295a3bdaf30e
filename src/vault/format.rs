//! On-disk vault envelope.
//!
//! A vault file is a single JSON object:
//!
//! ```text
//! {
//!   "format": "lockbox-vault",
//!   "version": 1,
//!   "kdf": { "algorithm": "pbkdf2-sha256", "iterations": 600000 },
//!   "salt": "<base64, 16 bytes>",
//!   "ciphertext": "<base64, nonce || ciphertext || tag>"
//! }
//! ```
//!
//! This module is pure framing.  Tampering with the KDF parameters or
//! the salt is caught later because it changes the derived key.

use serde::{Deserialize, Serialize};

use crate::crypto::encryption::{NONCE_LEN, TAG_LEN};
use crate::crypto::kdf::{KdfParams, SALT_LEN};
use crate::errors::{LockboxError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Marker identifying a Lockbox vault file.
pub const FORMAT_MARKER: &str = "lockbox-vault";

/// Current envelope version.
pub const CURRENT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Decoded contents of a vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub kdf: KdfParams,
    pub salt: [u8; SALT_LEN],
    /// Sealed entry set (nonce || ciphertext || tag).
    pub ciphertext: Vec<u8>,
}

/// Serde mirror of the JSON layout.  Every field is optional on the
/// way in so a missing one is reported as malformed, not as a serde
/// error string.
#[derive(Serialize, Deserialize)]
struct EnvelopeRecord {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    kdf: Option<KdfParams>,
    #[serde(
        default,
        serialize_with = "base64_encode",
        deserialize_with = "base64_decode"
    )]
    salt: Option<Vec<u8>>,
    #[serde(
        default,
        serialize_with = "base64_encode",
        deserialize_with = "base64_decode"
    )]
    ciphertext: Option<Vec<u8>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Frame salt, KDF parameters and ciphertext into file bytes.
pub fn encode(envelope: &Envelope) -> Result<Vec<u8>> {
    let record = EnvelopeRecord {
        format: Some(FORMAT_MARKER.to_string()),
        version: Some(CURRENT_VERSION),
        kdf: Some(envelope.kdf),
        salt: Some(envelope.salt.to_vec()),
        ciphertext: Some(envelope.ciphertext.clone()),
    };

    let mut bytes = serde_json::to_vec_pretty(&record)
        .map_err(|e| LockboxError::Serialization(format!("envelope: {e}")))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse file bytes back into an `Envelope`.
///
/// Fails with `MalformedEnvelope` on bad JSON, an unknown marker or
/// version, missing fields, invalid base64, a wrong-sized salt, a
/// ciphertext too short to hold a nonce and tag, or out-of-range KDF
/// parameters.
pub fn decode(bytes: &[u8]) -> Result<Envelope> {
    let record: EnvelopeRecord = serde_json::from_slice(bytes)
        .map_err(|e| LockboxError::MalformedEnvelope(format!("invalid JSON: {e}")))?;

    match record.format.as_deref() {
        Some(FORMAT_MARKER) => {}
        Some(other) => {
            return Err(LockboxError::MalformedEnvelope(format!(
                "unrecognized format marker '{other}'"
            )))
        }
        None => return Err(missing("format")),
    }

    let version = record.version.ok_or_else(|| missing("version"))?;
    if version != CURRENT_VERSION {
        return Err(LockboxError::MalformedEnvelope(format!(
            "unsupported version {version}, expected {CURRENT_VERSION}"
        )));
    }

    let kdf = record.kdf.ok_or_else(|| missing("kdf"))?;
    kdf.validate()
        .map_err(|e| LockboxError::MalformedEnvelope(e.to_string()))?;

    let salt_bytes = record.salt.ok_or_else(|| missing("salt"))?;
    let salt: [u8; SALT_LEN] = salt_bytes.as_slice().try_into().map_err(|_| {
        LockboxError::MalformedEnvelope(format!(
            "salt must be {SALT_LEN} bytes, got {}",
            salt_bytes.len()
        ))
    })?;

    let ciphertext = record.ciphertext.ok_or_else(|| missing("ciphertext"))?;
    if ciphertext.len() < NONCE_LEN + TAG_LEN {
        return Err(LockboxError::MalformedEnvelope(
            "ciphertext too short".into(),
        ));
    }

    Ok(Envelope {
        kdf,
        salt,
        ciphertext,
    })
}

fn missing(field: &str) -> LockboxError {
    LockboxError::MalformedEnvelope(format!("missing field '{field}'"))
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded byte fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

fn base64_encode<S>(data: &Option<Vec<u8>>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match data {
        Some(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
        None => serializer.serialize_none(),
    }
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<u8>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    s.map(|s| BASE64.decode(s).map_err(<D::Error as serde::de::Error>::custom))
        .transpose()
}
