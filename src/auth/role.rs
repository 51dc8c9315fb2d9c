//! User roles
//!
//! A role is the access-level tag that decides which dashboard view a user sees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Public,
    Analyst,
    /// Legacy records label this role `law`.
    #[serde(alias = "law")]
    LawEnforcement,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Public, Role::Analyst, Role::LawEnforcement];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Public => "public",
            Role::Analyst => "analyst",
            Role::LawEnforcement => "law_enforcement",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a role string is not one of the recognized roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Strict parse used at creation time. The legacy `law` label is only
    /// accepted when reading existing records.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Role::Public),
            "analyst" => Ok(Role::Analyst),
            "law_enforcement" => Ok(Role::LawEnforcement),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}
