pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod protocol;
pub mod server;
pub mod store;

pub use auth::{AuthOutcome, CreateOutcome, Role};
pub use error::{CreateUserError, DashboardError, StoreError};
pub use server::Server;
pub use store::{CredentialStore, UserRecord};
