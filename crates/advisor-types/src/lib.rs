//! Shared domain types for the advisor chat client.
//!
//! This crate contains the data shapes exchanged between the streaming
//! decoder, the transport and the front-end: chat messages, completion
//! wire types, configuration, skill validation results, and their errors.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod advisor;
pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod llm;
pub mod skill;
