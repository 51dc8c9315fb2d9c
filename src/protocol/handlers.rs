//! Command handlers module for the access service.
//!
//! Each handler turns a parsed command into a reply, consulting the
//! credential store for LOGIN and SIGNUP. Store calls take a file lock and
//! hash passwords, so they run on the blocking thread pool.

use log::{error, info, warn};

use crate::auth::{AuthOutcome, CreateOutcome, Role, is_valid_input};
use crate::client::Client;
use crate::config::LimitSettings;
use crate::error::handlers::{create_error_code, create_error_message, store_error_code};
use crate::protocol::responses::{self, format_response};
use crate::protocol::{Command, CommandResult, CommandStatus};
use crate::store::CredentialStore;

/// Dispatches a received command to its corresponding handler.
///
/// # Arguments
///
/// * `client` - Mutable reference to the client sending the command.
/// * `command` - The parsed command.
/// * `store` - Handle to the credential store.
/// * `limits` - Input limits for usernames and passwords.
pub async fn handle_command(
    client: &mut Client,
    command: Command,
    store: &CredentialStore,
    limits: &LimitSettings,
) -> CommandResult {
    match command {
        Command::Login { username, password } => {
            handle_cmd_login(client, username, password, store, limits).await
        }
        Command::Signup {
            username,
            password,
            role,
        } => handle_cmd_signup(username, password, role, store, limits).await,
        Command::View => handle_cmd_view(client),
        Command::WhoAmI => handle_cmd_whoami(client),
        Command::Roles => handle_cmd_roles(),
        Command::Logout => handle_cmd_logout(client),
        Command::Quit => handle_cmd_quit(client),
        Command::Malformed(usage) => failure(responses::SYNTAX_ERROR, &format!("Usage: {}", usage)),
        Command::Unknown => failure(responses::UNKNOWN_COMMAND, "Unknown command"),
    }
}

fn success(code: u16, message: &str) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(format_response(code, message)),
    }
}

fn failure(code: u16, message: &str) -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure(message.to_string()),
        message: Some(format_response(code, message)),
    }
}

/// Handles LOGIN: authenticates against the store and records the role.
///
/// Any failed attempt logs the client out.
async fn handle_cmd_login(
    client: &mut Client,
    username: String,
    password: String,
    store: &CredentialStore,
    limits: &LimitSettings,
) -> CommandResult {
    if !is_valid_input(&username, limits.max_username_length)
        || !is_valid_input(&password, limits.max_password_length)
    {
        client.logout();
        return failure(responses::NOT_LOGGED_IN, responses::INVALID_CREDENTIALS);
    }

    let store = store.clone();
    let lookup_name = username.clone();
    let outcome =
        tokio::task::spawn_blocking(move || store.authenticate_user(&lookup_name, &password)).await;

    match outcome {
        Ok(Ok(AuthOutcome::Authenticated(role))) => {
            client.login(username, role);
            success(
                responses::LOGIN_SUCCESS,
                &format!("Login successful, role {}", role),
            )
        }
        Ok(Ok(AuthOutcome::Failure)) => {
            client.logout();
            failure(responses::NOT_LOGGED_IN, responses::INVALID_CREDENTIALS)
        }
        Ok(Err(e)) => {
            error!("Authentication unavailable: {}", e);
            client.logout();
            failure(store_error_code(&e), responses::GENERIC_FAILURE)
        }
        Err(e) => {
            error!("Authentication task failed: {}", e);
            client.logout();
            failure(responses::SERVICE_UNAVAILABLE, responses::GENERIC_FAILURE)
        }
    }
}

/// Handles SIGNUP: registers a new user. Does not log the client in.
async fn handle_cmd_signup(
    username: String,
    password: String,
    role: String,
    store: &CredentialStore,
    limits: &LimitSettings,
) -> CommandResult {
    if !is_valid_input(&username, limits.max_username_length) {
        return failure(responses::SYNTAX_ERROR, "Invalid username");
    }
    if !is_valid_input(&password, limits.max_password_length) {
        return failure(responses::SYNTAX_ERROR, "Invalid password");
    }

    let store = store.clone();
    let outcome =
        tokio::task::spawn_blocking(move || store.create_user(&username, &password, &role)).await;

    match outcome {
        Ok(Ok(CreateOutcome::Created)) => {
            success(responses::USER_CREATED, "User created, please log in")
        }
        Ok(Ok(CreateOutcome::AlreadyExists)) => {
            failure(responses::USER_EXISTS, "Username already exists")
        }
        Ok(Err(e)) => {
            warn!("Signup rejected: {}", e);
            failure(create_error_code(&e), &create_error_message(&e))
        }
        Err(e) => {
            error!("Signup task failed: {}", e);
            failure(responses::SERVICE_UNAVAILABLE, responses::GENERIC_FAILURE)
        }
    }
}

/// Handles VIEW: reports the dashboard branch for the logged-in role.
fn handle_cmd_view(client: &Client) -> CommandResult {
    match client.view() {
        Some(view) => {
            let panels = view
                .panels()
                .iter()
                .map(|panel| panel.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            success(responses::OK, &format!("{}: {}", view.title(), panels))
        }
        None => failure(responses::NOT_LOGGED_IN, "Not logged in"),
    }
}

fn handle_cmd_whoami(client: &Client) -> CommandResult {
    match (client.username(), client.role()) {
        (Some(username), Some(role)) => success(responses::OK, &format!("{} ({})", username, role)),
        _ => failure(responses::NOT_LOGGED_IN, "Not logged in"),
    }
}

fn handle_cmd_roles() -> CommandResult {
    let roles = Role::ALL
        .iter()
        .map(|role| role.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    success(responses::OK, &roles)
}

fn handle_cmd_logout(client: &mut Client) -> CommandResult {
    if let Some(username) = client.username() {
        info!("User {} logged out", username);
    }
    client.logout();
    success(responses::CLOSING, "Logged out")
}

/// Handles QUIT: logs out the client and signals connection close.
fn handle_cmd_quit(client: &mut Client) -> CommandResult {
    client.logout();

    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(format_response(responses::CLOSING, "Goodbye")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::protocol::parse_command;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        store: CredentialStore,
        limits: LimitSettings,
        client: Client,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let store = CredentialStore::new(temp.path().join("users.json"));
            store.ensure_store_exists().unwrap();
            Self {
                _temp: temp,
                store,
                limits: AppConfig::default().limits,
                client: Client::default(),
            }
        }

        async fn run(&mut self, line: &str) -> CommandResult {
            handle_command(&mut self.client, parse_command(line), &self.store, &self.limits).await
        }
    }

    fn reply(result: &CommandResult) -> &str {
        result.message.as_deref().unwrap_or("")
    }

    #[tokio::test]
    async fn test_signup_then_login_then_view() {
        let mut fx = Fixture::new();

        let result = fx.run("SIGNUP alice pw123 analyst").await;
        assert_eq!(reply(&result), "250 User created, please log in\r\n");
        assert!(!fx.client.is_logged_in());

        let result = fx.run("LOGIN alice pw123").await;
        assert_eq!(result.status, CommandStatus::Success);
        assert_eq!(reply(&result), "230 Login successful, role analyst\r\n");

        let result = fx.run("VIEW").await;
        assert!(reply(&result).starts_with("200 Analyst dashboard: "));
        assert!(reply(&result).contains("forecasting"));
        assert!(!reply(&result).contains("export"));

        let result = fx.run("WHOAMI").await;
        assert_eq!(reply(&result), "200 alice (analyst)\r\n");
    }

    #[tokio::test]
    async fn test_failed_login_is_generic_and_logs_out() {
        let mut fx = Fixture::new();
        fx.run("SIGNUP alice pw123 public").await;
        fx.run("LOGIN alice pw123").await;
        assert!(fx.client.is_logged_in());

        let wrong_password = fx.run("LOGIN alice nope").await;
        let unknown_user = fx.run("LOGIN mallory pw123").await;
        assert_eq!(reply(&wrong_password), "530 Invalid username or password\r\n");
        assert_eq!(reply(&wrong_password), reply(&unknown_user));
        assert!(!fx.client.is_logged_in());
    }

    #[tokio::test]
    async fn test_signup_rejections() {
        let mut fx = Fixture::new();
        fx.run("SIGNUP alice pw123 public").await;

        let duplicate = fx.run("SIGNUP alice other analyst").await;
        assert_eq!(reply(&duplicate), "550 Username already exists\r\n");

        let bad_role = fx.run("SIGNUP bob x superadmin").await;
        assert!(reply(&bad_role).starts_with("501 Invalid role: superadmin"));

        let too_long = fx.run(&format!("SIGNUP {} pw public", "x".repeat(65))).await;
        assert!(reply(&too_long).starts_with("501"));

        assert_eq!(fx.store.load_users().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_store_is_reported_generically() {
        let mut fx = Fixture::new();
        std::fs::write(fx.store.path(), "{ not json").unwrap();

        let result = fx.run("LOGIN alice pw123").await;
        assert_eq!(reply(&result), "451 Service temporarily unavailable\r\n");
        assert!(!reply(&result).contains("users.json"));
    }

    #[tokio::test]
    async fn test_commands_requiring_login() {
        let mut fx = Fixture::new();
        assert_eq!(reply(&fx.run("VIEW").await), "530 Not logged in\r\n");
        assert_eq!(reply(&fx.run("WHOAMI").await), "530 Not logged in\r\n");
        assert_eq!(
            reply(&fx.run("ROLES").await),
            "200 public, analyst, law_enforcement\r\n"
        );
    }

    #[tokio::test]
    async fn test_quit_closes_connection() {
        let mut fx = Fixture::new();
        let result = fx.run("QUIT").await;
        assert_eq!(result.status, CommandStatus::CloseConnection);
        assert_eq!(reply(&result), "221 Goodbye\r\n");
    }
}
