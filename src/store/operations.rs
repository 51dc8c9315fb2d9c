//! Credential store operations
//!
//! Every operation re-reads the backing record; nothing is cached between
//! calls. Writers hold the store lock for the whole load, check, append and
//! persist sequence.

use log::{info, warn};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::auth::{
    AuthOutcome, CreateOutcome, Role, burn_verify, hash_password, verify_password,
};
use crate::error::{CreateUserError, StoreError};
use crate::store::lock::StoreLock;
use crate::store::persist;
use crate::store::record::{self, UserRecord};

/// Handle to a file-backed credential store.
///
/// Cheap to clone; clones refer to the same backing record.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl CredentialStore {
    /// Creates a handle for the backing record at `path`. Does not touch the
    /// filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = OsString::from(path.as_os_str());
        lock_name.push(".lock");
        Self {
            lock_path: PathBuf::from(lock_name),
            path,
        }
    }

    /// Location of the backing record.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty backing record if none exists. Idempotent.
    pub fn ensure_store_exists(&self) -> Result<(), StoreError> {
        if self.record_exists()? {
            return Ok(());
        }

        let _lock = StoreLock::acquire(&self.lock_path)?;
        // Another writer may have created it while we waited.
        if self.record_exists()? {
            return Ok(());
        }

        persist::write_users(&self.path, &[])?;
        info!("Created empty credential store at {}", self.path.display());
        Ok(())
    }

    /// Reads the full user sequence in registration order.
    pub fn load_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let bytes = fs::read(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        record::decode(&self.path, &bytes).inspect_err(|e| {
            warn!("{}", e);
        })
    }

    /// Replaces the stored user sequence with `users`, all or nothing.
    pub fn save_users(&self, users: &[UserRecord]) -> Result<(), StoreError> {
        let _lock = StoreLock::acquire(&self.lock_path)?;
        persist::write_users(&self.path, users)
    }

    /// Looks up a user record by exact username.
    pub fn find_user(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .load_users()?
            .into_iter()
            .find(|user| user.username == username))
    }

    /// Checks a username and password against the store.
    ///
    /// A wrong username and a wrong password produce the same
    /// [`AuthOutcome::Failure`]. Store errors are returned as errors, never
    /// folded into a failed login.
    pub fn authenticate_user(&self, username: &str, password: &str) -> Result<AuthOutcome, StoreError> {
        let users = self.load_users()?;

        let outcome = match users.iter().find(|user| user.username == username) {
            Some(user) if verify_password(password, &user.password_credential) => {
                AuthOutcome::Authenticated(user.role)
            }
            Some(_) => AuthOutcome::Failure,
            None => {
                // Same Argon2 cost as a wrong password, so timing does not
                // reveal which usernames exist.
                burn_verify(password);
                AuthOutcome::Failure
            }
        };

        match outcome {
            AuthOutcome::Authenticated(role) => info!("User {} authenticated as {}", username, role),
            AuthOutcome::Failure => warn!("Failed authentication attempt for {}", username),
        }

        Ok(outcome)
    }

    /// Registers a new user.
    ///
    /// Returns [`CreateOutcome::AlreadyExists`] without touching the store if
    /// the username is taken (case-sensitive).
    pub fn create_user(
        &self,
        username: &str,
        password: &str,
        role: &str,
    ) -> Result<CreateOutcome, CreateUserError> {
        if username.is_empty() {
            return Err(CreateUserError::MissingField("username"));
        }
        if password.is_empty() {
            return Err(CreateUserError::MissingField("password"));
        }
        let role: Role = role.parse()?;

        let _lock = StoreLock::acquire(&self.lock_path)?;
        let mut users = self.load_users()?;

        if users.iter().any(|user| user.username == username) {
            info!("Signup rejected, username {} already exists", username);
            return Ok(CreateOutcome::AlreadyExists);
        }

        let password_credential =
            hash_password(password).map_err(|e| CreateUserError::Hashing(e.to_string()))?;

        users.push(UserRecord {
            username: username.to_string(),
            password_credential,
            role,
        });
        persist::write_users(&self.path, &users)?;

        info!("Created user {} with role {}", username, role);
        Ok(CreateOutcome::Created)
    }

    fn record_exists(&self) -> Result<bool, StoreError> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.is_file() => Ok(true),
            Ok(_) => Err(StoreError::io(
                &self.path,
                io::Error::other("backing record is not a regular file"),
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}
