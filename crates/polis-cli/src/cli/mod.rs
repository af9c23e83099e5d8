//! CLI command definitions for the `polis` binary.
//!
//! Uses clap derive macros for argument parsing. Commands follow a
//! noun-verb pattern (e.g., `polis user create`, `polis conversation list`).

pub mod conversation;
pub mod user;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;

/// Manage Polis users and conversations.
#[derive(Parser)]
#[command(name = "polis", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding polis.db and polis.toml (default: ~/.polis).
    #[arg(long, global = true, env = "POLIS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and its tables, then exit.
    Init,

    /// Manage user accounts.
    User {
        #[command(subcommand)]
        action: user::UserCommand,
    },

    /// Manage conversations.
    Conversation {
        #[command(subcommand)]
        action: conversation::ConversationCommand,
    },
}

/// Report that the database is ready (the schema was created during startup).
pub fn print_ready(data_dir: &Path, json: bool) -> Result<()> {
    if json {
        let result = serde_json::json!({
            "ready": true,
            "data_dir": data_dir.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Database ready in {}",
            style("ok").green(),
            style(data_dir.display()).cyan(),
        );
        println!();
    }
    Ok(())
}

/// Tell the user a lookup came back empty. Not an error.
fn print_absent(kind: &str, id: impl std::fmt::Display, json: bool) -> Result<()> {
    if json {
        println!("null");
    } else {
        println!();
        println!(
            "  {} No {kind} with id {}",
            style("i").blue().bold(),
            style(id).yellow(),
        );
        println!();
    }
    Ok(())
}

/// Report the outcome of a delete.
fn print_deleted(kind: &str, id: impl std::fmt::Display, deleted: bool, json: bool) -> Result<()> {
    if json {
        let result = serde_json::json!({
            "id": id.to_string(),
            "deleted": deleted,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if deleted {
        println!();
        println!("  {} Deleted {kind} {}", style("ok").green(), style(id).cyan());
        println!();
    } else {
        print_absent(kind, id, false)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use polis_types::user::UserId;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_user_create_defaults_privilege() {
        let cli = Cli::try_parse_from(["polis", "user", "create", "a@x.com", "p1"]).unwrap();
        match cli.command {
            Commands::User {
                action: user::UserCommand::Create { privilege, .. },
            } => assert_eq!(privilege, "user"),
            _ => panic!("expected user create"),
        }
    }

    #[test]
    fn test_user_update_requires_every_field() {
        let partial = Cli::try_parse_from(["polis", "user", "update", "1", "b@x.com"]);
        assert!(partial.is_err());

        let full =
            Cli::try_parse_from(["polis", "user", "update", "1", "b@x.com", "p2", "admin"]).unwrap();
        match full.command {
            Commands::User {
                action: user::UserCommand::Update { id, .. },
            } => assert_eq!(id, UserId(1)),
            _ => panic!("expected user update"),
        }
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        assert!(Cli::try_parse_from(["polis", "user", "get", "abc"]).is_err());
    }

    #[test]
    fn test_conversation_create_takes_creator_flag() {
        let cli = Cli::try_parse_from([
            "polis",
            "--json",
            "conversation",
            "create",
            "Parks",
            "More parks?",
            "--creator",
            "3",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Conversation {
                action: conversation::ConversationCommand::Create { creator, .. },
            } => assert_eq!(creator, UserId(3)),
            _ => panic!("expected conversation create"),
        }
    }
}
