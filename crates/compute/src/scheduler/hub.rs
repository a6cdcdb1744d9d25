//! Observer fan-out for pool status.
//!
//! Membership heals itself: an observer is only found to be dead when a
//! send to it fails, and it is dropped in that same pass.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::message::ServerMessage;

/// Identity of an attached observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObserverId(Uuid);

impl ObserverId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ObserverId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A send to an observer failed; the observer is unreachable.
#[derive(Debug, thiserror::Error)]
#[error("observer is closed")]
pub struct ObserverClosed;

/// Something that can receive serialized status messages.
///
/// `send` must not block: the hub calls it while the scheduler holds its
/// registry lock.
pub trait Observer: Send + Sync {
    fn send(&self, message: &str) -> Result<(), ObserverClosed>;
}

impl Observer for mpsc::UnboundedSender<String> {
    fn send(&self, message: &str) -> Result<(), ObserverClosed> {
        mpsc::UnboundedSender::send(self, message.to_owned()).map_err(|_| ObserverClosed)
    }
}

/// The set of attached observers.
#[derive(Default)]
pub struct ObserverHub {
    observers: Mutex<HashMap<ObserverId, Box<dyn Observer>>>,
}

impl ObserverHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `observer`, then broadcast `message` so it starts with fresh state.
    pub fn attach(&self, observer: Box<dyn Observer>, message: &ServerMessage) -> ObserverId {
        let id = ObserverId::new();
        {
            let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
            observers.insert(id, observer);
            info!(observer = %id, total = observers.len(), "Observer attached");
        }
        self.broadcast(message);
        id
    }

    /// Remove an observer. Returns whether it was attached.
    pub fn detach(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let removed = observers.remove(&id).is_some();
        if removed {
            info!(observer = %id, total = observers.len(), "Observer detached");
        }
        removed
    }

    /// Send `message` to every observer, dropping those whose send fails.
    /// Returns the number of successful deliveries.
    pub fn broadcast(&self, message: &ServerMessage) -> usize {
        let payload = match message.to_json() {
            Ok(p) => p,
            Err(e) => {
                error!("Failed to serialize status message: {}", e);
                return 0;
            }
        };

        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|id, observer| match observer.send(&payload) {
            Ok(()) => true,
            Err(e) => {
                debug!(observer = %id, "Dropping observer: {}", e);
                false
            }
        });
        let delivered = observers.len();
        if delivered < before {
            info!(pruned = before - delivered, total = delivered, "Pruned unreachable observers");
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
