//! Error handlers
//!
//! Maps errors to reply codes and to the messages shown to clients.
//! Infrastructure failures get a generic message so paths never reach the wire.

use crate::error::types::{CreateUserError, DashboardError, StoreError};
use crate::protocol::responses;
use log::error;

/// Handle a dashboard service error
pub fn handle_error(err: &DashboardError) {
    error!("Dashboard error: {}", err);
}

/// Convert a store error to a reply code
pub fn store_error_code(err: &StoreError) -> u16 {
    match err {
        StoreError::Io { .. } | StoreError::Corrupt { .. } => responses::SERVICE_UNAVAILABLE,
    }
}

/// Convert a user creation error to a reply code
pub fn create_error_code(err: &CreateUserError) -> u16 {
    match err {
        CreateUserError::InvalidRole(_) | CreateUserError::MissingField(_) => {
            responses::SYNTAX_ERROR
        }
        CreateUserError::Hashing(_) => responses::SERVICE_UNAVAILABLE,
        CreateUserError::Store(e) => store_error_code(e),
    }
}

/// Message shown to the client for a user creation error
pub fn create_error_message(err: &CreateUserError) -> String {
    match err {
        CreateUserError::InvalidRole(role) => format!(
            "Invalid role: {} (expected public, analyst or law_enforcement)",
            role
        ),
        CreateUserError::MissingField(_) => "Please fill in all fields".to_string(),
        CreateUserError::Hashing(_) | CreateUserError::Store(_) => {
            responses::GENERIC_FAILURE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_store_errors_do_not_leak_paths() {
        let err = CreateUserError::Store(StoreError::io(
            "/srv/secret/users.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        ));
        assert_eq!(create_error_code(&err), responses::SERVICE_UNAVAILABLE);
        assert!(!create_error_message(&err).contains("/srv/secret"));
    }

    #[test]
    fn test_invalid_role_is_caller_error() {
        let err = CreateUserError::InvalidRole("superadmin".into());
        assert_eq!(create_error_code(&err), responses::SYNTAX_ERROR);
        assert!(create_error_message(&err).contains("superadmin"));
    }
}
