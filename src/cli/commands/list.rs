//! `lockbox list`: show entry names in a table.

use crate::cli::output;
use crate::cli::{load_context, prompt_password, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = load_context(cli)?;

    let password = prompt_password()?;
    let entries = ctx.store.unlock(password.as_bytes())?;

    let count = entries.len();
    let noun = if count == 1 { "entry" } else { "entries" };
    output::info(&format!("{count} {noun} in {}", ctx.store.path().display()));
    output::print_entries_table(&entries.names());

    Ok(())
}
