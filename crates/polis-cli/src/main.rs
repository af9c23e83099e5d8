//! Polis command-line entry point.
//!
//! Binary name: `polis`
//!
//! Parses CLI arguments, opens the database, creates the schema if needed,
//! then dispatches to the user or conversation command handler.

mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use polis_infra::actor::actor_from_pool;
use polis_infra::config::{load_config, resolve_data_dir};
use polis_infra::sqlite::pool::DatabasePool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity; RUST_LOG wins when set.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info,polis_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);
    tokio::fs::create_dir_all(&data_dir)
        .await
        .with_context(|| format!("cannot create data directory {}", data_dir.display()))?;

    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let config = load_config(&data_dir).await;
    let pool = DatabasePool::new(&config)
        .await
        .context("failed to open database")?;

    // Schema creation is part of startup, never a side effect of opening the pool.
    pool.bootstrap()
        .await
        .context("failed to create database schema")?;

    let actor = actor_from_pool(&pool);

    let result = match cli.command {
        Commands::Init => cli::print_ready(&data_dir, cli.json),
        Commands::User { action } => cli::user::handle_user_command(action, &actor, cli.json).await,
        Commands::Conversation { action } => {
            cli::conversation::handle_conversation_command(action, &actor, cli.json).await
        }
    };

    pool.close().await;
    result
}
