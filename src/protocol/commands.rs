//! Module `commands`
//!
//! Defines the access protocol commands, their parsing, and the result
//! returned by command handlers.

/// Represents a command parsed from a client line.
#[derive(Debug, PartialEq)]
pub enum Command {
    Login { username: String, password: String },
    Signup { username: String, password: String, role: String },
    View,
    WhoAmI,
    Roles,
    Logout,
    Quit,
    /// A known command with the wrong number of arguments.
    Malformed(&'static str),
    Unknown,
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses a raw line received from a client into a `Command`.
///
/// Command names are case-insensitive; arguments are whitespace separated
/// and kept verbatim.
pub fn parse_command(raw: &str) -> Command {
    let mut parts = raw.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_ascii_uppercase();
    let args: Vec<&str> = parts.collect();

    match (cmd.as_str(), args.as_slice()) {
        ("LOGIN", [username, password]) => Command::Login {
            username: username.to_string(),
            password: password.to_string(),
        },
        ("LOGIN", _) => Command::Malformed("LOGIN <username> <password>"),
        ("SIGNUP", [username, password, role]) => Command::Signup {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        },
        ("SIGNUP", _) => Command::Malformed("SIGNUP <username> <password> <role>"),
        ("VIEW", []) => Command::View,
        ("WHOAMI", []) => Command::WhoAmI,
        ("ROLES", []) => Command::Roles,
        ("LOGOUT", []) => Command::Logout,
        ("QUIT" | "Q", []) => Command::Quit,
        _ => Command::Unknown,
    }
}
