//! Main chat loop orchestration.
//!
//! Resolves the advisor, prints the banner, then alternates between reading
//! a message and streaming the reply until the user exits.

use console::style;
use tracing::info;

use advisor_core::chat::SendOutcome;
use advisor_types::chat::MessageRole;

use crate::cli::stream_view::{StreamView, run_turn};
use crate::state::{AppState, HttpChatSession};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::print_stats_footer;

/// Run the interactive chat loop with an advisor.
pub async fn run_chat_loop(state: &AppState, advisor_slug: &str) -> anyhow::Result<()> {
    let session = state.session(advisor_slug)?;
    let advisor = session.advisor().clone();

    print_welcome_banner(&advisor, state.config.model.as_deref(), &state.config.endpoint);
    info!(advisor = %advisor.slug, "chat session started");

    let prompt = format!("  {} ", style("You >").green().bold());
    let continuation = format!("  {} ", style("  ...").green().dim());
    let (mut chat_input, _writer) = ChatInput::new(prompt, continuation)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_message().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.trim().is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => {
                            session.clear();
                            chat_input.clear();
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::History => print_history(&session, &advisor.name),
                        ChatCommand::Unknown(name) => println!(
                            "\n  {} Unknown command: {}. Type /help for available commands.\n",
                            style("?").yellow().bold(),
                            style(name).dim()
                        ),
                    }
                    continue;
                }

                session.set_input(text);
                let view = StreamView {
                    label: &advisor.name,
                    live: true,
                    spinner: true,
                    notices: true,
                };
                let report = run_turn(&session, &view).await;

                match report.outcome {
                    SendOutcome::Completed => {
                        println!();
                        print_stats_footer(report.printed, report.elapsed, &advisor.slug);
                        println!();
                    }
                    SendOutcome::Failed(_) => {
                        eprintln!("  {}", style("Type a message to retry, /exit to quit.").dim());
                    }
                    SendOutcome::Rejected(reason) => {
                        tracing::debug!(?reason, "message not sent");
                    }
                }
            }
        }
    }

    info!(
        advisor = %advisor.slug,
        messages = session.messages().len(),
        "chat session ended"
    );
    Ok(())
}

fn print_history(session: &HttpChatSession, advisor_name: &str) {
    let messages = session.messages();
    println!();
    if messages.is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for msg in &messages {
        let role_label = match msg.role {
            MessageRole::User => style("You".to_string()).green(),
            MessageRole::Assistant => style(advisor_name.to_string()).cyan(),
        };
        let preview: String = if msg.content.chars().count() > 100 {
            let head: String = msg.content.chars().take(97).collect();
            format!("{head}...")
        } else {
            msg.content.clone()
        };
        println!("  {} {}", role_label.bold(), preview.replace('\n', " "));
    }
    println!();
}
