use clap::Parser;
use passvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Set {
            ref service,
            ref value,
            generate,
            length,
        } => passvault::cli::commands::set::execute(&cli, service, value.as_deref(), generate, length),
        Commands::Get { ref service } => passvault::cli::commands::get::execute(&cli, service),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Delete { ref service, force } => {
            passvault::cli::commands::delete::execute(&cli, service, force)
        }
        Commands::Generate { length } => passvault::cli::commands::generate::execute(length),
        Commands::Completions { ref shell } => passvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
