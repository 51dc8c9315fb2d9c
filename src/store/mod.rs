//! Credential storage
//!
//! Owns the durable set of registered users: a single JSON backing record,
//! replaced atomically on every write and guarded by a file lock.

pub mod lock;
pub mod operations;
mod persist;
pub mod record;

pub use operations::CredentialStore;
pub use record::UserRecord;
