use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::broadcast;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Publish failed: {0}")]
    PublishFailed(String),
}

/// Broadcast primitive used to inform connected real-time clients.
/// The transport that delivers events to clients subscribes on the other
/// side of this seam; it is not this crate's concern.
pub trait NotificationPublisher: Send + Sync {
    fn emit(&self, event: &str, payload: Value) -> Result<(), NotifyError>;
}

/// Publisher backed by a tokio broadcast channel. Each websocket (or other
/// push) session holds a receiver and forwards envelopes to its client.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    sender: broadcast::Sender<Value>,
}

impl BroadcastPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe a new real-time session.
    pub fn subscribe(&self) -> broadcast::Receiver<Value> {
        self.sender.subscribe()
    }
}

impl NotificationPublisher for BroadcastPublisher {
    fn emit(&self, event: &str, payload: Value) -> Result<(), NotifyError> {
        let envelope = json!({
            "event": event,
            "data": payload,
        });

        // send() errs only when no receiver is subscribed; with nobody
        // listening there is nothing to deliver.
        if let Err(e) = self.sender.send(envelope) {
            tracing::debug!("no notification subscribers: {}", e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscribers_is_ok() {
        let publisher = BroadcastPublisher::new(8);
        assert!(publisher.emit("newMonument", json!({"id": 1})).is_ok());
    }

    #[test]
    fn subscribers_receive_envelope() {
        let publisher = BroadcastPublisher::new(8);
        let mut rx = publisher.subscribe();

        publisher
            .emit("newMonument", json!({"id": 1, "title": "Tour Eiffel"}))
            .unwrap();

        let envelope = rx.try_recv().unwrap();
        assert_eq!(envelope["event"], "newMonument");
        assert_eq!(envelope["data"]["title"], "Tour Eiffel");
    }
}
