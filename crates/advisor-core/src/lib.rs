//! Streaming decoder and conversation driver for the advisor client.
//!
//! This crate holds the logic between the transport and the caller: the
//! line-oriented event stream decoder, the stream driver state machine,
//! the conversation event bus, and skill payload validation. It depends
//! only on `advisor-types` -- never on `advisor-infra` or any HTTP crate.

pub mod chat;
pub mod event;
pub mod skill;
pub mod stream;
