//! Interactive CLI chat with an advisor.
//!
//! Streams replies as they arrive, handles slash commands and multi-line
//! input. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
