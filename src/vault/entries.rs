//! The decrypted entry set: entry name -> secret value.
//!
//! Backed by a `BTreeMap` so the sealed JSON is order-independent and
//! deterministic.  Values are wiped from memory when the set is dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::errors::{LockboxError, Result};

/// In-memory mapping of entry name to secret value.
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntrySet {
    entries: BTreeMap<String, String>,
}

impl EntrySet {
    /// An empty entry set, as written by `initialize`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `name`.
    ///
    /// Fails with `EntryExists` when the name is taken and `overwrite`
    /// is false.  Returns `true` if an existing value was replaced.
    pub fn put(&mut self, name: &str, value: &str, overwrite: bool) -> Result<bool> {
        validate_entry_name(name)?;

        let replaced = self.contains(name);
        if replaced && !overwrite {
            return Err(LockboxError::EntryExists(name.to_string()));
        }

        if let Some(mut old) = self.entries.insert(name.to_string(), value.to_string()) {
            old.zeroize();
        }
        Ok(replaced)
    }

    /// Look up the value stored under `name`.
    pub fn get(&self, name: &str) -> Result<&str> {
        self.entries
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| LockboxError::EntryNotFound(name.to_string()))
    }

    /// Remove `name` from the set.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        match self.entries.remove(name) {
            Some(mut value) => {
                value.zeroize();
                Ok(())
            }
            None => Err(LockboxError::EntryNotFound(name.to_string())),
        }
    }

    /// Returns `true` if the set holds an entry called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for EntrySet {
    fn drop(&mut self) {
        for value in self.entries.values_mut() {
            value.zeroize();
        }
    }
}

// Values stay out of debug output and therefore out of logs.
impl std::fmt::Debug for EntrySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntrySet")
            .field("names", &self.names())
            .finish()
    }
}

/// Entry names must be non-empty.  Anything else is accepted as-is.
fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LockboxError::InvalidEntryName(
            "entry name cannot be empty".into(),
        ));
    }
    Ok(())
}
