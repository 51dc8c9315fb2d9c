//! Incident Dashboard - Entry Point
//!
//! Serves login, signup and role-gated view selection for the incident dashboard.

use log::info;

use incident_dashboard::config::AppConfig;
use incident_dashboard::error::handlers::handle_error;
use incident_dashboard::{CredentialStore, DashboardError, Server};

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DashboardError> {
    let config = AppConfig::load()?;

    let store = CredentialStore::new(config.store.users_file_path());
    store.ensure_store_exists()?;
    info!("Credential store: {}", store.path().display());

    let server = Server::bind(config, store).await?;
    server.start().await;
    Ok(())
}
