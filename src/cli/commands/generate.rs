//! `lockbox generate`: store a freshly generated random password.

use crate::cli::generate::generate_password;
use crate::cli::output;
use crate::cli::{load_context, prompt_password, Cli};
use crate::errors::Result;

/// Options for the `generate` command.
pub struct GenerateOptions {
    pub length: Option<usize>,
    pub no_symbols: bool,
    pub force: bool,
    pub print: bool,
}

/// Execute the `generate` command.
pub fn execute(cli: &Cli, name: &str, opts: &GenerateOptions) -> Result<()> {
    let ctx = load_context(cli)?;

    let length = opts.length.unwrap_or(ctx.settings.generate_length);
    let symbols = ctx.settings.generate_symbols && !opts.no_symbols;
    let secret = generate_password(length, symbols)?;

    let password = prompt_password()?;
    let mut entries = ctx.store.unlock(password.as_bytes())?;

    let replaced = entries.put(name, &secret, opts.force)?;
    ctx.store.save(&entries, password.as_bytes())?;

    let verb = if replaced { "replaced" } else { "stored" };
    output::success(&format!(
        "Generated a {length}-character password and {verb} it as '{name}'"
    ));

    if opts.print {
        println!("{}", secret.as_str());
    } else {
        output::tip(&format!("Run `lockbox get {name}` to print it."));
    }

    Ok(())
}
