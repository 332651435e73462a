//! stack-auth CLI binary entry point.

use clap::Parser;
use stack_auth_cli::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    stack_auth_cli::logging::init(cli.verbose);

    let result = match &cli.command {
        Commands::Login(args) => cli::auth::handle_login(args).await,
        Commands::Status => cli::auth::handle_status().await,
        Commands::Logout => cli::auth::handle_logout().await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", cli::errors::format_error_help(&e));
        std::process::exit(1);
    }
}
