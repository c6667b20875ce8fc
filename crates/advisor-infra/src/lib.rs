//! Infrastructure layer for the advisor client.
//!
//! Contains the implementations behind the seams defined in `advisor-core`:
//! the reqwest-based completion transport, `config.toml` loading, data
//! directory resolution and credential lookup.

pub mod config;
pub mod credential;
pub mod llm;
