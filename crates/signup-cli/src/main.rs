//! # signup CLI Entry Point
//!
//! Assembles subcommands and dispatches to the flow handlers.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use signup_client::AccountClient;

/// Account registration client.
///
/// Validates the registration form and submits it to the account service.
#[derive(Parser, Debug)]
#[command(name = "signup", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate the form and register the account.
    Register(signup_cli::args::RegisterArgs),
    /// Validate the form without contacting the account service.
    Validate(signup_cli::args::ValidateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    let code = match cli.command {
        Commands::Register(args) => {
            let config = signup_cli::flow::load_config(args.api_url.as_deref())?;
            let client = AccountClient::new(config)?;
            signup_cli::flow::register(&args, Arc::new(client), &mut stdout).await?
        }
        Commands::Validate(args) => signup_cli::flow::check(&args, &mut stdout)?,
    };

    Ok(ExitCode::from(code))
}
