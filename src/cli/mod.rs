//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod generate;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::paths::absolutize;
use crate::config::{lockbox_home, Settings};
use crate::errors::{LockboxError, Result};
use crate::vault::VaultStore;

/// Environment variable read before prompting for the master password.
pub const PASSWORD_ENV: &str = "LOCKBOX_PASSWORD";

/// Below this length `init` prints a warning (but still proceeds).
const WEAK_PASSWORD_LEN: usize = 8;

/// Lockbox CLI: a local encrypted password store.
#[derive(Parser)]
#[command(
    name = "lockbox",
    about = "Local encrypted password store",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file (default: ~/.lockbox/vault.json)
    #[arg(long, env = "LOCKBOX_VAULT", global = true)]
    pub vault: Option<PathBuf>,

    /// Config file (default: ~/.lockbox/config.toml)
    #[arg(long, env = "LOCKBOX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Store a secret under a name
    Add {
        /// Entry name (e.g. github)
        name: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
        /// Overwrite an existing entry
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password and store it
    Generate {
        /// Entry name
        name: String,
        /// Password length (default from config, 24)
        #[arg(short, long)]
        length: Option<usize>,
        /// Letters and digits only
        #[arg(long)]
        no_symbols: bool,
        /// Overwrite an existing entry
        #[arg(short, long)]
        force: bool,
        /// Print the generated password
        #[arg(short, long)]
        print: bool,
    },

    /// Print an entry's secret value
    Get {
        /// Entry name
        name: String,
    },

    /// Delete an entry
    Delete {
        /// Entry name
        name: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List entry names
    List,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolved configuration plus a store for the selected vault.
pub struct Context {
    pub settings: Settings,
    pub store: VaultStore,
}

/// Load settings and build the `VaultStore` the CLI arguments point at.
///
/// Precedence for the vault path: `--vault` / `LOCKBOX_VAULT`, then
/// `vault_file` from the config, resolved against the lockbox home.
pub fn load_context(cli: &Cli) -> Result<Context> {
    let home = lockbox_home()?;

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(&home)?,
    };

    let vault_path = match &cli.vault {
        Some(path) => {
            let cwd = std::env::current_dir().map_err(|e| LockboxError::storage(".", e))?;
            absolutize(path.clone(), &cwd)
        }
        None => settings.vault_path(&home),
    };

    let store = VaultStore::new(vault_path, settings.kdf_params()?);
    Ok(Context { settings, store })
}

/// Get the master password: `LOCKBOX_PASSWORD` if set, else a hidden prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Master password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| LockboxError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used by `init`).
///
/// Weak passwords are accepted with a warning; choosing a strong one is
/// the user's call.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    let password = match password_from_env() {
        Some(pw) => pw,
        None => Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Confirm master password",
                    "Passwords do not match, try again",
                )
                .allow_empty_password(true)
                .interact()
                .map_err(|e| LockboxError::CommandFailed(format!("password prompt: {e}")))?,
        ),
    };

    if password.chars().count() < WEAK_PASSWORD_LEN {
        output::warning(&format!(
            "Master password is shorter than {WEAK_PASSWORD_LEN} characters."
        ));
    }

    Ok(password)
}

fn password_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}
