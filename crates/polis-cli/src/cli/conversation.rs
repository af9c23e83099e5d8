//! Conversation subcommands: create, get, list, update, delete.

use anyhow::{Context, Result};
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use polis_core::repository::conversation::ConversationRepository;
use polis_infra::actor::SqliteDatabaseActor;
use polis_types::conversation::{Conversation, ConversationId};
use polis_types::user::UserId;

/// Conversation subcommands.
#[derive(Subcommand)]
pub enum ConversationCommand {
    /// Open a conversation on behalf of a user.
    Create {
        title: String,
        description: String,

        /// Id of the user opening the conversation.
        #[arg(long)]
        creator: UserId,
    },

    /// Show one conversation.
    Get { id: ConversationId },

    /// List every conversation.
    #[command(alias = "ls")]
    List,

    /// Replace every field of a conversation.
    Update {
        id: ConversationId,
        title: String,
        description: String,

        #[arg(long)]
        creator: UserId,
    },

    /// Delete a conversation.
    #[command(alias = "rm")]
    Delete { id: ConversationId },
}

/// Handle a conversation subcommand.
pub async fn handle_conversation_command(
    cmd: ConversationCommand,
    actor: &SqliteDatabaseActor,
    json: bool,
) -> Result<()> {
    match cmd {
        ConversationCommand::Create {
            title,
            description,
            creator,
        } => {
            let conversation = actor
                .create_conversation(&title, &description, creator)
                .await
                .with_context(|| format!("failed to create conversation for user {creator}"))?;
            print_conversation(&conversation, json)
        }
        ConversationCommand::Get { id } => match actor.read_conversation(id).await? {
            Some(conversation) => print_conversation(&conversation, json),
            None => super::print_absent("conversation", id, json),
        },
        ConversationCommand::List => {
            let conversations = actor.read_conversations().await?;
            print_conversations(&conversations, json)
        }
        ConversationCommand::Update {
            id,
            title,
            description,
            creator,
        } => match actor
            .update_conversation(id, &title, &description, creator)
            .await
            .with_context(|| format!("failed to update conversation {id}"))?
        {
            Some(conversation) => print_conversation(&conversation, json),
            None => super::print_absent("conversation", id, json),
        },
        ConversationCommand::Delete { id } => {
            let deleted = actor
                .delete_conversation(id)
                .await
                .with_context(|| format!("failed to delete conversation {id}"))?;
            super::print_deleted("conversation", id, deleted, json)
        }
    }
}

fn print_conversation(conversation: &Conversation, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(conversation)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(&conversation.title).cyan().bold(),
        style(format!("#{}", conversation.id)).dim()
    );
    println!("  {}", conversation.description);
    println!(
        "  {} {}",
        style("Creator:").bold(),
        style(conversation.creator_id).yellow()
    );
    println!();
    Ok(())
}

fn print_conversations(conversations: &[Conversation], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(conversations)?);
        return Ok(());
    }

    if conversations.is_empty() {
        println!();
        println!(
            "  {} No conversations yet. Open one with {}",
            style("i").blue().bold(),
            style("polis conversation create").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Creator").fg(Color::White),
    ]);

    for conversation in conversations {
        let desc = if conversation.description.chars().count() > 50 {
            let head: String = conversation.description.chars().take(47).collect();
            format!("{head}...")
        } else {
            conversation.description.clone()
        };

        table.add_row(vec![
            Cell::new(conversation.id).fg(Color::Cyan),
            Cell::new(&conversation.title),
            Cell::new(desc),
            Cell::new(conversation.creator_id).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    Ok(())
}
