//! layer-client CLI entry point.

use anyhow::Context;
use clap::Parser;
use layer_client::cli::announcements::AnnouncementsAction;
use layer_client::cli::conversations::ConversationsAction;
use layer_client::cli::messages::MessagesAction;
use layer_client::cli::notifications::NotificationsAction;
use layer_client::cli::{Cli, Commands, OutputFormat};
use layer_client::output::{format_output, json, pretty};
use layer_client::{
    ApiError, Client, ListParams, MessagePart, NewConversation, NewMessage, Push, Sender,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "layer_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    match run(cli).await {
        Err(e) if matches!(format, OutputFormat::Json) => match e.downcast_ref::<ApiError>() {
            Some(api_error) => {
                eprintln!("{}", json::format_error(api_error));
                std::process::exit(1);
            }
            None => Err(e),
        },
        result => result,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = Client::new(cli.config()).context("Invalid client configuration")?;
    tracing::debug!(config = ?client.config(), "Client ready");

    match cli.command {
        Commands::Conversations(conversations_cmd) => match conversations_cmd.action {
            ConversationsAction::Create {
                participants,
                not_distinct,
                metadata,
            } => {
                let mut req = NewConversation::new(participants).distinct(!not_distinct);
                if let Some(metadata) = metadata {
                    req = req.metadata(metadata);
                }
                let conversation = client.conversations().create_conversation(req).await?;
                match cli.format {
                    OutputFormat::Json => {
                        println!("{}", format_output(&conversation, cli.format))
                    }
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_conversation(&conversation))
                    }
                }
            }
            ConversationsAction::Get { id } => {
                let conversation = client.conversations().find(&id).await?;
                match cli.format {
                    OutputFormat::Json => {
                        println!("{}", format_output(&conversation, cli.format))
                    }
                    OutputFormat::Pretty => {
                        println!("{}", pretty::format_conversation(&conversation))
                    }
                }
            }
            ConversationsAction::Delete { id } => {
                let conversation = client.conversations().find(&id).await?;
                conversation.destroy().await?;
                if !cli.quiet {
                    println!("Deleted conversation {}", id);
                }
            }
        },
        Commands::Messages(messages_cmd) => match messages_cmd.action {
            MessagesAction::List {
                conversation,
                page_size,
                from_id,
            } => {
                let params = ListParams {
                    page_size,
                    from_id,
                    ..ListParams::default()
                };
                let messages = client.messages(&conversation).list_with(&params).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&messages, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_messages(&messages)),
                }
            }
            MessagesAction::Create {
                conversation,
                sender,
                text,
                mime_type,
                push,
            } => {
                let parts = text
                    .into_iter()
                    .map(|body| MessagePart::new(body, mime_type.as_str()))
                    .collect();
                let mut req = NewMessage::new(Sender::User(sender), parts);
                if let Some(push) = push {
                    req = req.notification(serde_json::json!({ "text": push }));
                }
                let message = client.messages(&conversation).send(req).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&message, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Created:\n{}", pretty::format_message(&message))
                    }
                }
            }
            MessagesAction::Get { conversation, id } => {
                let message = client.messages(&conversation).find(&id).await?;
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&message, cli.format)),
                    OutputFormat::Pretty => println!("{}", pretty::format_message(&message)),
                }
            }
            MessagesAction::Delete { conversation, id } => {
                let messages = client.messages(&conversation);
                let message = messages.find(&id).await?;
                messages.destroy(&message).await?;
                if !cli.quiet {
                    println!("Deleted message {}", id);
                }
            }
        },
        Commands::Announcements(announcements_cmd) => match announcements_cmd.action {
            AnnouncementsAction::Send {
                recipients,
                sender_name,
                text,
            } => {
                let announcement = client
                    .announcements()
                    .send_text(&recipients, &sender_name, &text)
                    .await?;
                match cli.format {
                    OutputFormat::Json => {
                        println!("{}", format_output(&announcement, cli.format))
                    }
                    OutputFormat::Pretty => {
                        println!("Sent:\n{}", pretty::format_announcement(&announcement))
                    }
                }
            }
        },
        Commands::Notifications(notifications_cmd) => match notifications_cmd.action {
            NotificationsAction::Send {
                recipients,
                title,
                text,
                sound,
            } => {
                let push = Push { title, text, sound };
                let notification = client.notifications().push(&recipients, push).await?;
                match cli.format {
                    OutputFormat::Json => {
                        println!("{}", format_output(&notification, cli.format))
                    }
                    OutputFormat::Pretty => {
                        println!("Sent:\n{}", pretty::format_notification(&notification))
                    }
                }
            }
        },
    }

    Ok(())
}
