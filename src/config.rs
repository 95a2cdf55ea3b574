use crate::error::{Result, TFJobError};

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Depth of each job's serialized observation queue. Observations beyond
    /// this depth apply backpressure to the caller.
    pub observation_queue_depth: usize,
    /// Capacity of the broadcast channel carrying status-changed events.
    pub status_channel_capacity: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            observation_queue_depth: 64,
            status_channel_capacity: 256,
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(depth) = std::env::var("TFJOB_OBSERVATION_QUEUE_DEPTH") {
            config.observation_queue_depth = depth.parse().map_err(|e| {
                TFJobError::ConfigurationError(format!("Invalid observation_queue_depth: {e}"))
            })?;
        }

        if let Ok(capacity) = std::env::var("TFJOB_STATUS_CHANNEL_CAPACITY") {
            config.status_channel_capacity = capacity.parse().map_err(|e| {
                TFJobError::ConfigurationError(format!("Invalid status_channel_capacity: {e}"))
            })?;
        }

        Ok(config)
    }
}
