use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

/// Last known state of a store connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Connected,
    Disconnected,
}

/// Notification fed into a [`Liveness`] flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The driver (re)established its connection
    Connected,
    /// The transport reported a failure; carries the driver's message
    Error(String),
}

/// Two-state connection flag driven by [`ConnectionEvent`]s
///
/// Only the derived boolean is exposed. The flag reflects the last event
/// received and can lag the actual reachability of the server. Clones share
/// the same underlying state, so a clone can be handed to a driver callback.
#[derive(Debug, Clone)]
pub struct Liveness {
    store: &'static str,
    connected: Arc<AtomicBool>,
}

impl Liveness {
    pub fn new(store: &'static str, initial: LinkState) -> Self {
        Self {
            store,
            connected: Arc::new(AtomicBool::new(initial == LinkState::Connected)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn state(&self) -> LinkState {
        if self.is_alive() {
            LinkState::Connected
        } else {
            LinkState::Disconnected
        }
    }

    /// Apply an event and return the resulting state.
    ///
    /// Errors are logged here since the event source has no caller to report
    /// them to. They are never propagated.
    pub fn apply(&self, event: ConnectionEvent) -> LinkState {
        match event {
            ConnectionEvent::Connected => {
                if !self.connected.swap(true, Ordering::AcqRel) {
                    info!(store = self.store, "Connection established");
                }
                LinkState::Connected
            }
            ConnectionEvent::Error(message) => {
                self.connected.store(false, Ordering::Release);
                error!(store = self.store, error = %message, "Connection error");
                LinkState::Disconnected
            }
        }
    }
}
