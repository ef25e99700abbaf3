use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod config;
mod console;

use commands::{
    AlreadyReported, ConfigCommand, CreateCommand, DeleteCommand, ListCommand, ShellCommand,
    UpdateCommand,
};
use config::Config;
use console::ConsoleNotifier;
use roster_core::{HttpEmployeeClient, SyncController};

#[derive(Parser)]
#[command(name = "roster")]
#[command(version)]
#[command(about = "Manage the employees of a Roster server", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all employees
    List(ListCommand),

    /// Create an employee
    Create(CreateCommand),

    /// Update an existing employee
    Update(UpdateCommand),

    /// Delete an employee
    Delete(DeleteCommand),

    /// Start an interactive session
    Shell(ShellCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        if !e.is::<AlreadyReported>() {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    let Some(command) = cli.command else {
        println!("Use --help to see available commands");
        return Ok(());
    };

    if let Commands::Config(cmd) = &command {
        return cmd.run(&config);
    }

    tracing::debug!(server_url = %config.server_url.value, "using employees server");
    let controller = SyncController::new(
        Arc::new(HttpEmployeeClient::new(config.server_url.value.clone())),
        Arc::new(ConsoleNotifier),
    );

    match command {
        Commands::List(cmd) => cmd.run(&controller).await,
        Commands::Create(cmd) => cmd.run(&controller).await,
        Commands::Update(cmd) => cmd.run(&controller).await,
        Commands::Delete(cmd) => cmd.run(&controller).await,
        Commands::Shell(cmd) => cmd.run(&controller).await,
        Commands::Config(_) => Ok(()),
    }
}
