//! Access protocol implementation
//!
//! Handles command parsing, dispatch, and reply generation.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::handle_command;
