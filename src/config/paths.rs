use std::path::{Path, PathBuf};

use crate::errors::{LockboxError, Result};

/// Environment variable that overrides the lockbox home directory.
pub const HOME_ENV: &str = "LOCKBOX_HOME";

/// Directory holding the default vault and config file.
///
/// `$LOCKBOX_HOME` if set, otherwise `~/.lockbox`.
pub fn lockbox_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::home_dir()
        .map(|home| home.join(".lockbox"))
        .ok_or_else(|| {
            LockboxError::Config(format!(
                "cannot determine home directory; set {HOME_ENV} or pass --vault"
            ))
        })
}

pub fn default_config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

pub fn absolutize(path: PathBuf, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolutize_keeps_absolute_paths() {
        let abs = PathBuf::from("/var/lib/vault.json");
        assert_eq!(absolutize(abs.clone(), Path::new("/home/u")), abs);
    }

    #[test]
    fn absolutize_joins_relative_paths() {
        assert_eq!(
            absolutize(PathBuf::from("vault.json"), Path::new("/home/u/.lockbox")),
            PathBuf::from("/home/u/.lockbox/vault.json")
        );
    }
}
