use tokio::sync::broadcast;

use crate::models::TFJobStatus;

/// Broadcast publisher carrying status changes to the external store.
///
/// The core pushes a [`StatusChanged`] event whenever a job's phase, a
/// replica-group state or tally, or the condition history changes; the
/// reconciliation loop subscribes and persists the payload.
#[derive(Debug, Clone)]
pub struct StatusPublisher {
    sender: broadcast::Sender<StatusChanged>,
}

/// Status event that has been published
#[derive(Debug, Clone)]
pub struct StatusChanged {
    pub runtime_id: String,
    pub status: TFJobStatus,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl StatusPublisher {
    /// Create a new publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish the current status of a job
    pub async fn publish(
        &self,
        runtime_id: impl Into<String>,
        status: TFJobStatus,
    ) -> Result<(), PublishError> {
        let event = StatusChanged {
            runtime_id: runtime_id.into(),
            status,
            published_at: chrono::Utc::now(),
        };

        // A send error only means there are no subscribers right now; status
        // changes are still valid without a listening store.
        match self.sender.send(event) {
            Ok(_) => Ok(()),
            Err(broadcast::error::SendError(_)) => Ok(()),
        }
    }

    /// Subscribe to status changes
    pub fn subscribe(&self) -> broadcast::Receiver<StatusChanged> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Error types for status publishing
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Status channel is closed")]
    ChannelClosed,
}

impl Default for StatusPublisher {
    fn default() -> Self {
        Self::new(256)
    }
}
