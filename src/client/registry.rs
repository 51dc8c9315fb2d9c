//! Client registry
//!
//! Tracks connected clients and enforces the connection cap.

use std::collections::HashMap;
use std::net::SocketAddr;

/// Registry of connected clients, keyed by peer address
pub struct ClientRegistry {
    clients: HashMap<SocketAddr, Option<String>>,
    max_clients: usize,
}

impl ClientRegistry {
    pub fn new(max_clients: usize) -> Self {
        Self {
            clients: HashMap::new(),
            max_clients,
        }
    }

    /// Registers a connection; returns false when the registry is full.
    pub fn try_register(&mut self, addr: SocketAddr) -> bool {
        if self.clients.len() >= self.max_clients {
            return false;
        }
        self.clients.insert(addr, None);
        true
    }

    /// Records which user, if any, is logged in on a connection.
    pub fn set_username(&mut self, addr: &SocketAddr, username: Option<String>) {
        if let Some(entry) = self.clients.get_mut(addr) {
            *entry = username;
        }
    }

    pub fn remove(&mut self, addr: &SocketAddr) -> bool {
        self.clients.remove(addr).is_some()
    }

    pub fn username(&self, addr: &SocketAddr) -> Option<&str> {
        self.clients.get(addr).and_then(|u| u.as_deref())
    }

    /// Number of connected clients.
    pub fn count(&self) -> usize {
        self.clients.len()
    }

    pub fn max_clients(&self) -> usize {
        self.max_clients
    }
}
