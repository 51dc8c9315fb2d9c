//! Credential transform
//!
//! Passwords are stored as Argon2id PHC strings with a per-user random salt.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use log::warn;
use std::sync::LazyLock;

/// Hash checked when a username has no record, so unknown and known users
/// cost the same Argon2 verify.
static DUMMY_CREDENTIAL: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("incident-dashboard-placeholder").ok());

#[cfg(test)]
thread_local! {
    static VERIFICATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Number of Argon2 verifications run on this thread.
#[cfg(test)]
pub(crate) fn verification_count() -> usize {
    VERIFICATIONS.with(|count| count.get())
}

/// Hashes a password into a self-describing PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Checks a password against a stored credential.
///
/// A stored value that is not a PHC string (for example a plaintext
/// password left by an older deployment) never verifies.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => run_verify(password, &parsed),
        Err(e) => {
            warn!("Stored credential is not a valid password hash: {}", e);
            burn_verify(password);
            false
        }
    }
}

/// Runs a verify against the placeholder credential and discards the result.
pub fn burn_verify(password: &str) {
    if let Some(parsed) = DUMMY_CREDENTIAL
        .as_deref()
        .and_then(|stored| PasswordHash::new(stored).ok())
    {
        let _ = run_verify(password, &parsed);
    }
}

fn run_verify(password: &str, parsed: &PasswordHash<'_>) -> bool {
    #[cfg(test)]
    VERIFICATIONS.with(|count| count.set(count.get() + 1));

    Argon2::default()
        .verify_password(password.as_bytes(), parsed)
        .is_ok()
}
