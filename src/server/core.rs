use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::client::{ClientRegistry, handle_client};
use crate::config::AppConfig;
use crate::error::DashboardError;
use crate::protocol::responses::{self, format_response};
use crate::store::CredentialStore;

pub struct Server {
    registry: Arc<Mutex<ClientRegistry>>,
    listener: TcpListener,
    store: CredentialStore,
    config: Arc<AppConfig>,
}

impl Server {
    /// Binds the listener. The credential store should already exist.
    pub async fn bind(config: AppConfig, store: CredentialStore) -> Result<Self, DashboardError> {
        let socket = config.server.socket_addr();

        let listener = TcpListener::bind(&socket).await.inspect_err(|e| {
            error!("Failed to bind to {}: {}", socket, e);
        })?;
        info!("Server bound to {}", listener.local_addr()?);

        Ok(Self {
            registry: Arc::new(Mutex::new(ClientRegistry::new(config.server.max_clients))),
            listener,
            store,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub async fn start(&self) {
        info!(
            "Starting incident dashboard access service (max {} clients, store {})",
            self.config.server.max_clients,
            self.store.path().display()
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let registry = Arc::clone(&self.registry);
                    let store = self.store.clone();
                    let config = Arc::clone(&self.config);

                    // Spawn a task for each client so accept loop doesn't block
                    tokio::spawn(async move {
                        if let Err(e) = handle_new_client(stream, addr, registry, store, config).await
                        {
                            warn!("Failed to handle client {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}

/// Registers a new client, runs its session, and unregisters it afterwards.
async fn handle_new_client(
    mut stream: TcpStream,
    client_addr: SocketAddr,
    registry: Arc<Mutex<ClientRegistry>>,
    store: CredentialStore,
    config: Arc<AppConfig>,
) -> Result<(), std::io::Error> {
    let admitted = {
        let mut clients = registry.lock().await;
        let admitted = clients.try_register(client_addr);
        if admitted {
            info!(
                "Client connected: {} ({}/{} clients)",
                client_addr,
                clients.count(),
                clients.max_clients()
            );
        }
        admitted
    };

    if !admitted {
        warn!("Rejecting {}: connection limit reached", client_addr);
        stream
            .write_all(
                format_response(
                    responses::TOO_MANY_CONNECTIONS,
                    "Too many connections. Try again later.",
                )
                .as_bytes(),
            )
            .await?;
        return Ok(());
    }

    let result = handle_client(stream, client_addr, Arc::clone(&registry), store, config).await;

    let mut clients = registry.lock().await;
    match clients.username(&client_addr) {
        Some(username) => info!("Client {} ({}) disconnected", client_addr, username),
        None => info!("Client {} disconnected", client_addr),
    }
    clients.remove(&client_addr);
    info!("{} clients remaining", clients.count());
    drop(clients);

    result
}
