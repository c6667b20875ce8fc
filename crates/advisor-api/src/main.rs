//! Advisor CLI entry point.
//!
//! Binary name: `advisor`
//!
//! Parses CLI arguments, sets up logging, loads configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use advisor_observe::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, SkillCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,advisor_core=debug",
        _ => "trace",
    };
    let tracing_options = TracingOptions {
        default_filter: filter.to_string(),
        json: cli.log_json,
        otel: cli.otel,
    };
    init_tracing(&tracing_options).map_err(|e| anyhow::anyhow!("Failed to set up logging: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "advisor", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    let result = match cli.command {
        Commands::Chat { advisor } => cli::chat::loop_runner::run_chat_loop(&state, &advisor).await,

        Commands::Ask {
            prompt,
            advisor,
            no_stream,
        } => cli::ask::ask(&state, &advisor, &prompt.join(" "), no_stream, cli.json, cli.quiet).await,

        Commands::Advisors => cli::advisors::list_advisors(&state, cli.json),

        Commands::Skill { action } => match action {
            SkillCommand::Validate {
                definition,
                payload,
                output,
            } => cli::skill::validate(&state, &definition, &payload, output, cli.json).await,
        },

        // Handled before state is loaded.
        Commands::Completions { .. } => Ok(()),
    };

    shutdown_tracing();
    result
}
