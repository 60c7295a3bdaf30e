//! `lockbox init`: create a new, empty vault.

use crate::cli::output;
use crate::cli::{load_context, prompt_new_password, Cli};
use crate::errors::{LockboxError, Result};
use crate::vault::VaultState;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = load_context(cli)?;
    let path = ctx.store.path();

    // Check before prompting so the user isn't asked for a password
    // that would be thrown away.  `initialize` checks again.
    if ctx.store.state() == VaultState::Locked {
        output::tip("Use `lockbox add <NAME>` to store secrets in the existing vault.");
        return Err(LockboxError::AlreadyExists(path.to_path_buf()));
    }

    let password = prompt_new_password()?;
    ctx.store.initialize(password.as_bytes())?;

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `lockbox add <NAME>` to store a secret.");
    output::tip("Run `lockbox generate <NAME>` to store a random password.");

    Ok(())
}
