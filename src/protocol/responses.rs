//! Reply codes
//!
//! Defines reply codes and formatting for the access protocol.

pub const OK: u16 = 200;
pub const READY: u16 = 220;
pub const CLOSING: u16 = 221;
pub const LOGIN_SUCCESS: u16 = 230;
pub const USER_CREATED: u16 = 250;
pub const TOO_MANY_CONNECTIONS: u16 = 421;
pub const SERVICE_UNAVAILABLE: u16 = 451;
pub const UNKNOWN_COMMAND: u16 = 500;
pub const SYNTAX_ERROR: u16 = 501;
pub const NOT_LOGGED_IN: u16 = 530;
pub const USER_EXISTS: u16 = 550;

/// Shown for every infrastructure failure; internal details stay in the log.
pub const GENERIC_FAILURE: &str = "Service temporarily unavailable";

/// Shown for every rejected login, whichever half was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Format a reply line
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_response() {
        assert_eq!(format_response(OK, "fine"), "200 fine\r\n");
    }
}
