use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::state_machine::states::TFReplicaState;

/// Role a replica group plays within a distributed training job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TFReplicaType {
    /// Parameter servers. Long-lived helpers that are not expected to
    /// terminate on their own.
    PS,
    /// Distributed training workers.
    Worker,
    /// Single-process local execution.
    Local,
}

impl TFReplicaType {
    /// Check whether processes of this role are expected to run until
    /// externally torn down rather than exit by themselves
    pub fn is_non_terminating(&self) -> bool {
        matches!(self, Self::PS)
    }
}

impl fmt::Display for TFReplicaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PS => write!(f, "PS"),
            Self::Worker => write!(f, "Worker"),
            Self::Local => write!(f, "Local"),
        }
    }
}

impl std::str::FromStr for TFReplicaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PS" => Ok(Self::PS),
            "Worker" => Ok(Self::Worker),
            "Local" => Ok(Self::Local),
            _ => Err(format!("Invalid replica type: {s}")),
        }
    }
}

/// Aggregated status of one replica group: the overall state summarizing the
/// group plus the per-state tally of its processes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TFReplicaStatus {
    #[serde(rename = "type")]
    pub replica_type: TFReplicaType,
    /// Overall state of the group, derived from the per-process states.
    pub state: TFReplicaState,
    /// Number of processes currently in each state. Counts always sum to the
    /// group's declared replica count.
    #[serde(
        rename = "tfReplicasStates",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub tf_replicas_states: BTreeMap<TFReplicaState, usize>,
}

impl TFReplicaStatus {
    pub fn new(
        replica_type: TFReplicaType,
        state: TFReplicaState,
        tf_replicas_states: BTreeMap<TFReplicaState, usize>,
    ) -> Self {
        Self {
            replica_type,
            state,
            tf_replicas_states,
        }
    }

    /// Number of processes of this group in the given state.
    pub fn count_in(&self, state: TFReplicaState) -> usize {
        self.tf_replicas_states.get(&state).copied().unwrap_or(0)
    }
}
