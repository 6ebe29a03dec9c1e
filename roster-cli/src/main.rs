//! Roster CLI - reviewer assignment for team pull requests
//!
//! Runs the HTTP server or performs single operations against the database.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roster_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{PrArgs, ServeArgs, StatsArgs, TeamArgs, UserArgs};

/// Roster: pull request reviewer assignment
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/roster/config.toml)
    #[arg(long, global = true, env = "ROSTER_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database path (overrides config and env)
    #[arg(long, global = true, env = "ROSTER_DB_PATH")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Run the HTTP server
    Serve(ServeArgs),

    /// Manage teams
    Team(TeamArgs),

    /// Manage users
    User(UserArgs),

    /// Manage pull requests
    Pr(PrArgs),

    /// Show review statistics
    Stats(StatsArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let port = match &cli.command {
        Some(Commands::Serve(args)) => args.port,
        _ => None,
    };
    let config = Config::load_with_overrides(cli.config.clone(), cli.db_path.clone(), port)?;

    if cli.verbose {
        tracing::debug!(
            bind = %config.server.bind_addr(),
            db_path = ?config.database.path,
            max_reviewers = config.assignment.max_reviewers,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("roster {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Serve(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Team(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::User(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Pr(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Stats(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            print_config(&config, cli.config.as_deref());
        }
        None => {
            println!("Roster - reviewer assignment for team pull requests");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn print_config(config: &Config, explicit: Option<&std::path::Path>) {
    println!("Roster Configuration");
    println!("====================");
    println!();
    println!("Server:");
    println!("  bind: {}", config.server.bind_addr());
    println!();
    println!("Database:");
    let db_path = roster_db::DatabaseConfig::from_settings(&config.database).path;
    println!("  path: {}", db_path.display());
    println!("  max_connections: {}", config.database.max_connections);
    println!();
    println!("Assignment:");
    println!("  max_reviewers: {}", config.assignment.max_reviewers);
    println!(
        "  fail_when_no_candidate: {}",
        config.assignment.fail_when_no_candidate
    );
    println!();

    let path = explicit
        .map(std::path::Path::to_path_buf)
        .or_else(Config::default_config_path);
    if let Some(path) = path {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }
}
