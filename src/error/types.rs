//! Error types
//!
//! Defines domain-specific error types for the credential store and the
//! access service built on top of it.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::auth::ParseRoleError;

/// Credential store errors
///
/// Both variants are infrastructure failures: the requested operation could
/// not be carried out and the caller decides whether to retry.
#[derive(Debug)]
pub enum StoreError {
    /// The backing record (or its lock file) could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// The backing record exists but is not a well-formed user list.
    Corrupt { path: PathBuf, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "I/O error on credential store {}: {}", path.display(), source)
            }
            StoreError::Corrupt { path, reason } => {
                write!(f, "Corrupt credential store {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Corrupt { .. } => None,
        }
    }
}

/// User creation errors
#[derive(Debug)]
pub enum CreateUserError {
    /// The requested role is not one of the recognized roles.
    InvalidRole(String),
    /// A required field was empty.
    MissingField(&'static str),
    /// The password could not be hashed.
    Hashing(String),
    Store(StoreError),
}

impl fmt::Display for CreateUserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateUserError::InvalidRole(r) => write!(f, "Invalid role: {}", r),
            CreateUserError::MissingField(field) => write!(f, "Missing required field: {}", field),
            CreateUserError::Hashing(e) => write!(f, "Password hashing failed: {}", e),
            CreateUserError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CreateUserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CreateUserError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseRoleError> for CreateUserError {
    fn from(error: ParseRoleError) -> Self {
        CreateUserError::InvalidRole(error.0)
    }
}

impl From<StoreError> for CreateUserError {
    fn from(error: StoreError) -> Self {
        CreateUserError::Store(error)
    }
}

/// Top-level error for the dashboard service
#[derive(Debug)]
pub enum DashboardError {
    Store(StoreError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Store(e) => write!(f, "Store error: {}", e),
            DashboardError::Config(e) => write!(f, "Configuration error: {}", e),
            DashboardError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for DashboardError {}

impl From<StoreError> for DashboardError {
    fn from(error: StoreError) -> Self {
        DashboardError::Store(error)
    }
}

impl From<config::ConfigError> for DashboardError {
    fn from(error: config::ConfigError) -> Self {
        DashboardError::Config(error)
    }
}

impl From<io::Error> for DashboardError {
    fn from(error: io::Error) -> Self {
        DashboardError::IoError(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_dashboard_error_conversions() {
        let store: DashboardError = StoreError::corrupt("users.json", "bad json").into();
        assert!(matches!(store, DashboardError::Store(StoreError::Corrupt { .. })));
        assert_eq!(
            store.to_string(),
            "Store error: Corrupt credential store users.json: bad json"
        );

        let io: DashboardError = io::Error::new(io::ErrorKind::AddrInUse, "taken").into();
        assert!(matches!(io, DashboardError::IoError(_)));
        assert_eq!(io.to_string(), "I/O error: taken");

        let config: DashboardError = config::ConfigError::Message("bad port".into()).into();
        assert!(matches!(config, DashboardError::Config(_)));
        assert!(config.to_string().starts_with("Configuration error: "));
    }

    #[test]
    fn test_create_user_error_chains_store_source() {
        let err: CreateUserError =
            StoreError::io("users.json", io::Error::new(io::ErrorKind::NotFound, "gone")).into();
        assert!(err.source().is_some());
        assert!(CreateUserError::MissingField("username").source().is_none());
    }
}
