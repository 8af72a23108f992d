//! Parley is a small terminal client for OpenAI-compatible chat-completion
//! endpoints.
//!
//! The crate is organized around a few collaborating layers:
//! - [`core`] owns the conversation model, the chat exchange, settings
//!   persistence, and the session state that guards against stale replies.
//! - [`api`] defines the wire payloads and model discovery.
//! - [`cli`] parses arguments and runs the chat loop and settings commands.
//! - [`utils`] holds endpoint URL construction and logging setup.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod utils;
