//! `lockbox delete`: remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{load_context, prompt_password, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: &str, yes: bool) -> Result<()> {
    let ctx = load_context(cli)?;

    // Unless --yes is set, ask for confirmation before deleting.
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry '{name}'?"))
            .default(false)
            .interact()
            .map_err(|e| LockboxError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let password = prompt_password()?;
    let mut entries = ctx.store.unlock(password.as_bytes())?;

    entries.delete(name)?;
    ctx.store.save(&entries, password.as_bytes())?;

    output::success(&format!("Deleted entry '{name}'"));

    Ok(())
}
