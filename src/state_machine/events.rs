use serde::{Deserialize, Serialize};

use super::states::TFReplicaState;
use crate::models::TFReplicaType;

/// One observed state change of an individual replica process, as reported by
/// the platform watching the job's processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaObservation {
    pub replica_type: TFReplicaType,
    /// Index of the process within its replica group.
    pub index: usize,
    pub state: TFReplicaState,
}

impl ReplicaObservation {
    pub fn new(replica_type: TFReplicaType, index: usize, state: TFReplicaState) -> Self {
        Self {
            replica_type,
            index,
            state,
        }
    }

    /// Observation of a process that started running
    pub fn running(replica_type: TFReplicaType, index: usize) -> Self {
        Self::new(replica_type, index, TFReplicaState::Running)
    }

    /// Observation of a process that exited successfully
    pub fn succeeded(replica_type: TFReplicaType, index: usize) -> Self {
        Self::new(replica_type, index, TFReplicaState::Succeeded)
    }

    /// Observation of a process that exited in failure
    pub fn failed(replica_type: TFReplicaType, index: usize) -> Self {
        Self::new(replica_type, index, TFReplicaState::Failed)
    }

    /// Observation of a process whose state could not be obtained
    pub fn unknown(replica_type: TFReplicaType, index: usize) -> Self {
        Self::new(replica_type, index, TFReplicaState::Unknown)
    }
}
