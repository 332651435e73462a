//! CLI entry point for stack-auth.

pub mod auth;
pub mod errors;

use clap::{Parser, Subcommand};

/// Stack Auth CLI
#[derive(Parser, Debug)]
#[command(name = "stack-auth", version, about = "Stack Auth CLI")]
pub struct Cli {
    /// Enable debug logging (overridden by STACK_AUTH_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to Stack Auth
    Login(LoginArgs),
    /// Show whether credentials are stored
    Status,
    /// Remove stored credentials
    Logout,
}

/// Arguments for `stack-auth login`.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// The ID of the tenancy to authenticate with
    #[arg(long, required = true)]
    pub tenancy_id: String,

    /// The base URL of the Stack Auth API
    #[arg(long)]
    pub api_url: Option<String>,

    /// Print the login URL instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,
}
