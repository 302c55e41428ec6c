//! Pieces shared by both store clients

pub mod error;
pub mod health;
pub mod liveness;

pub use error::{StoreError, StoreResult};
pub use health::HealthStatus;
pub use liveness::{ConnectionEvent, LinkState, Liveness};
