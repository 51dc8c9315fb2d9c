//! Server core functionality
//!
//! Accept loop and connection lifecycle for the access service.

pub mod core;

pub use self::core::Server;
