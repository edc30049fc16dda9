// crates/core/src/error.rs
use thiserror::Error;

/// Errors raised by the connection registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Delivery failed to subscriber: {subscriber}")]
    DeliveryFailed { subscriber: String },
}
