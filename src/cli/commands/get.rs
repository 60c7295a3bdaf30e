//! `lockbox get`: print a single entry's secret value.

use crate::cli::{load_context, prompt_password, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, name: &str) -> Result<()> {
    let ctx = load_context(cli)?;

    let password = prompt_password()?;
    let entries = ctx.store.unlock(password.as_bytes())?;

    // Only the value goes to stdout so it can be piped.
    println!("{}", entries.get(name)?);

    Ok(())
}
