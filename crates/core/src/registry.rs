use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::RegistryError;

/// A connected subscriber's send capability.
pub struct Subscriber {
    /// Client-supplied identifier, kept for display and bookkeeping.
    pub id: String,
    pub tx: mpsc::UnboundedSender<String>,
    pub connected_at: Instant,
}

impl Subscriber {
    pub fn new(id: impl Into<String>, tx: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id: id.into(),
            tx,
            connected_at: Instant::now(),
        }
    }
}

/// Opaque token identifying one registration.
///
/// Assigned by the registry, so two connections claiming the same client id
/// never collide or evict each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(Uuid);

impl fmt::Display for SubscriptionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Result of one broadcast pass over the live set.
#[derive(Debug, Default)]
pub struct BroadcastReport {
    pub delivered: usize,
    /// Tokens whose send failed. The caller decides whether to unregister
    /// them; the registry never removes a handle on its own.
    pub failed: Vec<SubscriptionToken>,
}

/// Live subscriber set with fan-out delivery.
///
/// Registrations, disconnections and broadcasts may all run concurrently.
/// `broadcast` snapshots the set up front, so delivery never holds up a new
/// registration.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<DashMap<SubscriptionToken, Subscriber>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
        }
    }

    /// Add a subscriber to the active set and return its token.
    pub fn register(&self, subscriber: Subscriber) -> SubscriptionToken {
        let token = SubscriptionToken(Uuid::new_v4());
        info!(subscriber_id = %subscriber.id, %token, "subscriber registered");
        self.connections.insert(token, subscriber);
        token
    }

    /// Remove a subscriber. Idempotent: unknown or already-removed tokens
    /// are a no-op.
    pub fn unregister(&self, token: &SubscriptionToken) {
        if let Some((_, subscriber)) = self.connections.remove(token) {
            info!(subscriber_id = %subscriber.id, %token, "subscriber unregistered");
        }
    }

    /// Deliver `message` to every subscriber registered at the time of the
    /// call.
    ///
    /// A recipient whose channel is gone is collected into the report and
    /// delivery continues with the rest. Delivery order across recipients is
    /// unspecified.
    pub fn broadcast(&self, message: &str) -> BroadcastReport {
        let targets: Vec<(SubscriptionToken, mpsc::UnboundedSender<String>)> = self
            .connections
            .iter()
            .map(|entry| (*entry.key(), entry.value().tx.clone()))
            .collect();

        let mut report = BroadcastReport::default();
        for (token, tx) in targets {
            if tx.send(message.to_string()).is_ok() {
                report.delivered += 1;
            } else {
                warn!(%token, "broadcast delivery failed");
                report.failed.push(token);
            }
        }
        report
    }

    /// Deliver `message` to exactly one subscriber.
    pub fn send_one(&self, token: &SubscriptionToken, message: &str) -> Result<(), RegistryError> {
        let Some(entry) = self.connections.get(token) else {
            return Err(RegistryError::DeliveryFailed {
                subscriber: token.to_string(),
            });
        };
        entry
            .tx
            .send(message.to_string())
            .map_err(|_| RegistryError::DeliveryFailed {
                subscriber: entry.id.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
