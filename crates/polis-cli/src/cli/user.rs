//! User subcommands: create, get, list, update, delete.
//!
//! Passwords are accepted and stored as given but never printed.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use polis_core::repository::user::UserRepository;
use polis_infra::actor::SqliteDatabaseActor;
use polis_types::user::{User, UserId};

/// User subcommands.
#[derive(Subcommand)]
pub enum UserCommand {
    /// Create a user.
    Create {
        email: String,
        password: String,

        /// Privilege label.
        #[arg(long, default_value = User::DEFAULT_PRIVILEGE)]
        privilege: String,
    },

    /// Show one user.
    Get { id: UserId },

    /// List every user.
    #[command(alias = "ls")]
    List,

    /// Replace every field of a user.
    Update {
        id: UserId,
        email: String,
        password: String,
        privilege: String,
    },

    /// Delete a user.
    #[command(alias = "rm")]
    Delete { id: UserId },
}

/// Handle a user subcommand.
pub async fn handle_user_command(
    cmd: UserCommand,
    actor: &SqliteDatabaseActor,
    json: bool,
) -> Result<()> {
    match cmd {
        UserCommand::Create {
            email,
            password,
            privilege,
        } => {
            let user = actor
                .create_user(&email, &password, &privilege)
                .await
                .context("failed to create user")?;
            print_user(&user, json)
        }
        UserCommand::Get { id } => match actor.read_user(id).await? {
            Some(user) => print_user(&user, json),
            None => super::print_absent("user", id, json),
        },
        UserCommand::List => {
            let users = actor.read_users().await?;
            print_users(&users, json)
        }
        UserCommand::Update {
            id,
            email,
            password,
            privilege,
        } => match actor
            .update_user(id, &email, &password, &privilege)
            .await
            .with_context(|| format!("failed to update user {id}"))?
        {
            Some(user) => print_user(&user, json),
            None => super::print_absent("user", id, json),
        },
        UserCommand::Delete { id } => {
            let deleted = actor
                .delete_user(id)
                .await
                .with_context(|| format!("failed to delete user {id}"))?;
            super::print_deleted("user", id, deleted, json)
        }
    }
}

fn user_json(user: &User) -> serde_json::Value {
    serde_json::json!({
        "id": user.id,
        "email": user.email,
        "privilege": user.privilege,
    })
}

fn print_user(user: &User, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&user_json(user))?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("ID:").bold(), style(user.id).cyan());
    println!("  {} {}", style("Email:").bold(), user.email);
    println!("  {} {}", style("Privilege:").bold(), user.privilege);
    println!();
    Ok(())
}

fn print_users(users: &[User], json: bool) -> Result<()> {
    if json {
        let list: Vec<serde_json::Value> = users.iter().map(user_json).collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if users.is_empty() {
        println!();
        println!(
            "  {} No users yet. Create one with {}",
            style("i").blue().bold(),
            style("polis user create").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Email").fg(Color::White),
        Cell::new("Privilege").fg(Color::White),
    ]);

    for user in users {
        let privilege_cell = if user.privilege == User::DEFAULT_PRIVILEGE {
            Cell::new(&user.privilege)
        } else {
            Cell::new(&user.privilege).fg(Color::Yellow)
        };

        table.add_row(vec![
            Cell::new(user.id).fg(Color::Cyan),
            Cell::new(&user.email),
            privilege_cell,
        ]);
    }

    println!("{table}");
    Ok(())
}
