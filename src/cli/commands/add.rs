//! `lockbox add`: store a secret under a name.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{load_context, prompt_password, Cli};
use crate::errors::{LockboxError, Result};

/// Execute the `add` command.
pub fn execute(cli: &Cli, name: &str, value: Option<&str>, force: bool) -> Result<()> {
    let ctx = load_context(cli)?;

    // Determine the secret value from one of three sources.
    let secret_value = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Value provided on command line; it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| LockboxError::CommandFailed(format!("reading stdin: {e}")))?;
        let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed_len);
        buf
    } else {
        // Source 3: Interactive hidden prompt (default).
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Secret for {name}"))
                .allow_empty_password(true)
                .interact()
                .map_err(|e| LockboxError::CommandFailed(format!("input prompt: {e}")))?,
        )
    };

    let password = prompt_password()?;
    let mut entries = ctx.store.unlock(password.as_bytes())?;

    let replaced = entries.put(name, &secret_value, force)?;
    ctx.store.save(&entries, password.as_bytes())?;

    let verb = if replaced { "updated" } else { "added" };
    output::success(&format!(
        "Entry '{name}' {verb} ({} total)",
        entries.len()
    ));

    Ok(())
}
