//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` ties the envelope codec to the crypto layer.  It holds
//! only the vault location and the KDF policy; the decrypted
//! `EntrySet` is handed to the caller by `unlock` and passed back to
//! `save`, so nothing secret outlives the command that needed it.
//!
//! Every save re-encrypts the whole entry set under a fresh salt and
//! replaces the file with a temp-file + fsync + rename sequence.  There
//! is no inter-process locking: two processes that unlock, mutate and
//! save concurrently will lose one of the updates (last writer wins).

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::crypto::{derive_key, generate_salt, open, seal, KdfParams};
use crate::errors::{LockboxError, Result};

use super::entries::EntrySet;
use super::format::{self, Envelope};

/// File mode for vault files (owner read/write only).
#[cfg(unix)]
const VAULT_FILE_MODE: u32 = 0o600;

/// Mode for vault directories created by `initialize`.
#[cfg(unix)]
const VAULT_DIR_MODE: u32 = 0o700;

/// What is on disk at the store's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// No file yet; only `initialize` is allowed.
    Absent,
    /// A vault file exists and must be unlocked to read it.
    Locked,
}

/// Handle to a vault file at an explicit location.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
    kdf: KdfParams,
}

impl VaultStore {
    /// Create a handle for the vault at `path`.
    ///
    /// `kdf` is used for every new save; existing files are opened with
    /// whatever parameters they were written with.
    pub fn new(path: impl Into<PathBuf>, kdf: KdfParams) -> Self {
        Self {
            path: path.into(),
            kdf,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> VaultState {
        if self.path.exists() {
            VaultState::Locked
        } else {
            VaultState::Absent
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Create a new, empty vault.
    ///
    /// Refuses to touch an existing file.  The final rename is
    /// no-clobber, so a vault that appears between the check and the
    /// commit is still not overwritten.
    pub fn initialize(&self, password: &[u8]) -> Result<()> {
        if self.state() == VaultState::Locked {
            return Err(LockboxError::AlreadyExists(self.path.clone()));
        }

        create_vault_dir(self.dir())?;

        let bytes = self.seal_entries(&EntrySet::new(), password)?;
        self.stage(&bytes)?.commit_new()?;

        info!(path = %self.path.display(), kdf = self.kdf.algorithm(), "vault created");
        Ok(())
    }

    /// Read, authenticate and decrypt the vault.
    ///
    /// A wrong password, a damaged file, and a file that is not a vault
    /// at all are reported identically as `UnlockFailed`.  The real
    /// cause is only logged at debug level.
    pub fn unlock(&self, password: &[u8]) -> Result<EntrySet> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LockboxError::VaultNotFound(self.path.clone()));
            }
            Err(e) => return Err(LockboxError::storage(&self.path, e)),
        };

        match open_envelope(&bytes, password) {
            Ok(entries) => {
                debug!(path = %self.path.display(), entries = entries.len(), "vault unlocked");
                Ok(entries)
            }
            Err(e) => {
                debug!(path = %self.path.display(), cause = %e, "vault unlock failed");
                Err(LockboxError::UnlockFailed)
            }
        }
    }

    /// Re-encrypt the whole entry set and atomically replace the file.
    ///
    /// A fresh salt is generated on every call, never reused from the
    /// loaded envelope.  If anything fails before the rename, the file
    /// on disk is left exactly as it was.
    pub fn save(&self, entries: &EntrySet, password: &[u8]) -> Result<()> {
        let bytes = self.seal_entries(entries, password)?;
        self.stage(&bytes)?.commit()?;

        info!(path = %self.path.display(), entries = entries.len(), "vault saved");
        Ok(())
    }

    /// Write `bytes` to a synced temp file next to the vault.
    ///
    /// Nothing is visible at the vault path until `PendingSave::commit`;
    /// dropping the returned value discards the temp file.
    pub fn stage(&self, bytes: &[u8]) -> Result<PendingSave> {
        let dir = self.dir();

        let mut tmp = tempfile::Builder::new()
            .prefix(".lockbox-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| LockboxError::storage(dir, e))?;

        let tmp_path = tmp.path().to_path_buf();
        restrict_file(tmp.as_file()).map_err(|e| LockboxError::storage(&tmp_path, e))?;
        tmp.write_all(bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| LockboxError::storage(&tmp_path, e))?;

        debug!(tmp = %tmp_path.display(), bytes = bytes.len(), "staged vault write");

        Ok(PendingSave {
            tmp,
            target: self.path.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn seal_entries(&self, entries: &EntrySet, password: &[u8]) -> Result<Vec<u8>> {
        let salt = generate_salt();
        let key = derive_key(password, &salt, &self.kdf)?;

        let plaintext = Zeroizing::new(
            serde_json::to_vec(entries)
                .map_err(|e| LockboxError::Serialization(format!("entries: {e}")))?,
        );
        let ciphertext = seal(&plaintext, &key)?;

        format::encode(&Envelope {
            kdf: self.kdf,
            salt,
            ciphertext,
        })
    }
}

/// Decode, derive, open and parse.  Any error here becomes `UnlockFailed`.
fn open_envelope(bytes: &[u8], password: &[u8]) -> Result<EntrySet> {
    let envelope = format::decode(bytes)?;
    let key = derive_key(password, &envelope.salt, &envelope.kdf)?;
    let plaintext = Zeroizing::new(open(&envelope.ciphertext, &key)?);

    serde_json::from_slice(&plaintext)
        .map_err(|e| LockboxError::Serialization(format!("entries: {e}")))
}

// ---------------------------------------------------------------------------
// PendingSave
// ---------------------------------------------------------------------------

/// A fully written and synced temp file waiting to replace the vault.
#[derive(Debug)]
pub struct PendingSave {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl PendingSave {
    /// Path of the staged temp file.
    pub fn temp_path(&self) -> &Path {
        self.tmp.path()
    }

    /// Atomically rename the temp file over the vault path.
    pub fn commit(self) -> Result<()> {
        let target = self.target;
        self.tmp
            .persist(&target)
            .map_err(|e| LockboxError::storage(&target, e.error))?;
        finish_commit(&target);
        Ok(())
    }

    /// Like `commit`, but fails with `AlreadyExists` instead of
    /// replacing a file that is already there.
    fn commit_new(self) -> Result<()> {
        let target = self.target;
        self.tmp.persist_noclobber(&target).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                LockboxError::AlreadyExists(target.clone())
            } else {
                LockboxError::storage(&target, e.error)
            }
        })?;
        finish_commit(&target);
        Ok(())
    }
}

/// Post-rename housekeeping.  The new vault is already in place here and
/// was created 0600, so neither step can fail the save.
fn finish_commit(target: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(target, fs::Permissions::from_mode(VAULT_FILE_MODE)) {
            debug!(path = %target.display(), error = %e, "post-rename chmod skipped");
        }
    }

    sync_parent_dir(target);
}

/// Flush the directory entry so the rename itself survives a crash.
/// Best effort: not every platform lets you open a directory.
fn sync_parent_dir(target: &Path) {
    if let Some(dir) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
            debug!(dir = %dir.display(), error = %e, "directory sync skipped");
        }
    }
}

#[cfg(unix)]
fn restrict_file(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(VAULT_FILE_MODE))
}

#[cfg(not(unix))]
fn restrict_file(_file: &File) -> io::Result<()> {
    Ok(())
}

fn create_vault_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(VAULT_DIR_MODE);
    }
    builder
        .create(dir)
        .map_err(|e| LockboxError::storage(dir, e))
}
