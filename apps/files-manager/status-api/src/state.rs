//! Shared application state

use storage::StorageClients;

/// State handed to every handler. Cloning shares the store clients.
#[derive(Clone, Debug)]
pub struct AppState {
    pub clients: StorageClients,
}

impl AppState {
    pub fn new(clients: StorageClients) -> Self {
        Self { clients }
    }
}
