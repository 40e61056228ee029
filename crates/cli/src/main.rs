//! SmartSkills CLI - command-line front end for the SmartSkills service.
//!
//! # Usage
//!
//! ```bash
//! # Sign in and persist the session
//! ss-cli login -e user@example.com -p secret
//!
//! # Show the signed-in account (the protected surface)
//! ss-cli whoami
//!
//! # Create an account (signs you in on success)
//! ss-cli register -e user@example.com -p secret -f Ada -l Lovelace -s female
//!
//! # Recover a forgotten password
//! ss-cli reset-password
//!
//! # Sign out
//! ss-cli logout
//! ```
//!
//! # Commands
//!
//! - `login` - Exchange credentials for a session
//! - `logout` - End the session
//! - `whoami` - Show the current identity (requires a session)
//! - `register` - Create an account and sign in
//! - `reset-password` - Interactive three-step password recovery

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ss-cli")]
#[command(author, version, about = "SmartSkills command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Create an account (and sign in on success)
    Register(commands::register::RegisterArgs),
    /// Recover a forgotten password (interactive)
    ResetPassword,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&email, password).await?,
        Commands::Logout => commands::auth::logout()?,
        Commands::Whoami => commands::auth::whoami()?,
        Commands::Register(args) => commands::register::register(args).await?,
        Commands::ResetPassword => commands::reset::run().await?,
    }
    Ok(())
}
