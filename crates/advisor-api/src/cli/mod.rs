//! CLI command definitions for the `advisor` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod advisors;
pub mod ask;
pub mod chat;
pub mod skill;
pub mod stream_view;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with AI advisor personas from the terminal.
#[derive(Parser)]
#[command(name = "advisor", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export trace spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, hide = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat with an advisor.
    Chat {
        /// Advisor slug to chat with.
        #[arg(long, short, default_value = "general")]
        advisor: String,
    },

    /// Ask a single question and print the streamed answer.
    Ask {
        /// The question (joined with spaces).
        #[arg(required = true)]
        prompt: Vec<String>,

        /// Advisor slug to ask.
        #[arg(long, short, default_value = "general")]
        advisor: String,

        /// Wait for the full answer and render it as markdown.
        #[arg(long)]
        no_stream: bool,
    },

    /// List configured advisors.
    #[command(alias = "ls")]
    Advisors,

    /// Work with skill definitions.
    Skill {
        #[command(subcommand)]
        action: SkillCommand,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SkillCommand {
    /// Validate a payload against a skill definition's schema and size limit.
    Validate {
        /// Skill definition JSON file.
        definition: PathBuf,

        /// Payload JSON file.
        payload: PathBuf,

        /// Validate as skill output instead of input.
        #[arg(long)]
        output: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn ask_joins_prompt_words() {
        let cli = Cli::parse_from(["advisor", "ask", "how", "are", "you", "-a", "cfo"]);
        match cli.command {
            Commands::Ask { prompt, advisor, no_stream } => {
                assert_eq!(prompt.join(" "), "how are you");
                assert_eq!(advisor, "cfo");
                assert!(!no_stream);
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn skill_validate_parses_paths() {
        let cli = Cli::parse_from([
            "advisor", "--json", "skill", "validate", "skill.json", "out.json", "--output",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Skill {
                action: SkillCommand::Validate { definition, output, .. },
            } => {
                assert_eq!(definition, PathBuf::from("skill.json"));
                assert!(output);
            }
            _ => panic!("expected skill validate"),
        }
    }
}
