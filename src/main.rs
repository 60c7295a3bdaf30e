use clap::Parser;
use lockbox::cli::commands::generate::GenerateOptions;
use lockbox::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    lockbox::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => lockbox::cli::commands::init::execute(&cli),
        Commands::Add {
            ref name,
            ref value,
            force,
        } => lockbox::cli::commands::add::execute(&cli, name, value.as_deref(), force),
        Commands::Generate {
            ref name,
            length,
            no_symbols,
            force,
            print,
        } => lockbox::cli::commands::generate::execute(
            &cli,
            name,
            &GenerateOptions {
                length,
                no_symbols,
                force,
                print,
            },
        ),
        Commands::Get { ref name } => lockbox::cli::commands::get::execute(&cli, name),
        Commands::Delete { ref name, yes } => {
            lockbox::cli::commands::delete::execute(&cli, name, yes)
        }
        Commands::List => lockbox::cli::commands::list::execute(&cli),
        Commands::Completions { ref shell } => lockbox::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
