use clap::Parser;
use tagdo::cli::commands::Cli;
use tagdo::cli::handlers;

fn main() {
    let cli = Cli::parse();

    // No subcommand launches the TUI; handlers decide
    if let Err(e) = handlers::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
