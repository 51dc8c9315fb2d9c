//! Authentication result types
//!
//! Expected, non-exceptional outcomes of store operations. These are values,
//! not errors: a wrong password or a taken username is routine.

use crate::auth::Role;

/// Result of an authentication attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(Role),
    /// No record matched the username and password. Deliberately does not
    /// say which one was wrong.
    Failure,
}

/// Result of a user creation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}
