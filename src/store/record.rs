//! Backing record format
//!
//! The backing record is a JSON document with a single mandatory `users` array.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::auth::Role;
use crate::error::StoreError;

/// A registered user as stored in the backing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Argon2 PHC string, never the raw password.
    #[serde(rename = "password")]
    pub password_credential: String,
    pub role: Role,
}

#[derive(Deserialize)]
struct UsersFile {
    users: Vec<UserRecord>,
}

#[derive(Serialize)]
struct UsersFileRef<'a> {
    users: &'a [UserRecord],
}

/// Parses the raw bytes of a backing record.
pub(crate) fn decode(path: &Path, bytes: &[u8]) -> Result<Vec<UserRecord>, StoreError> {
    serde_json::from_slice::<UsersFile>(bytes)
        .map(|file| file.users)
        .map_err(|e| StoreError::corrupt(path, e.to_string()))
}

/// Serializes a user sequence into a backing record.
pub(crate) fn encode(path: &Path, users: &[UserRecord]) -> Result<Vec<u8>, StoreError> {
    let mut bytes = serde_json::to_vec_pretty(&UsersFileRef { users })
        .map_err(|e| StoreError::io(path, std::io::Error::other(e)))?;
    bytes.push(b'\n');
    Ok(bytes)
}
