//! Authentication system
//!
//! Roles, the one-way credential transform, input validation and the
//! outcome types returned by the credential store.

pub mod credentials;
pub mod results;
pub mod role;
pub mod validator;

pub use credentials::{burn_verify, hash_password, verify_password};
pub use results::{AuthOutcome, CreateOutcome};
pub use role::{ParseRoleError, Role};
pub use validator::is_valid_input;
