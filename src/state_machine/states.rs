use serde::{Deserialize, Serialize};
use std::fmt;

/// High-level summary of where a job is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TFJobPhase {
    /// Initial phase before the job has been admitted. Serializes as the
    /// empty string on the wire.
    #[serde(rename = "")]
    None,
    /// Process state could not be obtained, typically due to an error in
    /// communicating with the host of the job. Transient and self-healing.
    Unknown,
    /// The job was admitted but not all of its processes have started.
    Pending,
    /// At least one process is running or in the process of starting.
    Running,
    /// The job finished successfully per its termination policy.
    Succeeded,
    /// A non-tolerated process failure terminated the job.
    Failed,
}

impl TFJobPhase {
    /// Check if this is a terminal phase (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Check if this is an active phase (the job is making progress)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for TFJobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, ""),
            Self::Unknown => write!(f, "Unknown"),
            Self::Pending => write!(f, "Pending"),
            Self::Running => write!(f, "Running"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl std::str::FromStr for TFJobPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::None),
            "Unknown" => Ok(Self::Unknown),
            "Pending" => Ok(Self::Pending),
            "Running" => Ok(Self::Running),
            "Succeeded" => Ok(Self::Succeeded),
            "Failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid job phase: {s}")),
        }
    }
}

/// Default phase for a job that has not been admitted yet
impl Default for TFJobPhase {
    fn default() -> Self {
        Self::None
    }
}

/// Observed state of an individual replica process
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TFReplicaState {
    /// The process state could not be observed.
    Unknown,
    /// The process has not started yet.
    Waiting,
    /// The process is running.
    Running,
    /// The process terminated successfully.
    Succeeded,
    /// The process terminated in failure.
    Failed,
}

impl TFReplicaState {
    /// Check if this is a terminal state (the process exited)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Check if this is an active state (the process is doing work)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Check if the process has left the waiting state. Unobservable
    /// processes do not count as started.
    pub fn has_started(&self) -> bool {
        matches!(self, Self::Running | Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for TFReplicaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Waiting => write!(f, "Waiting"),
            Self::Running => write!(f, "Running"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

impl std::str::FromStr for TFReplicaState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unknown" => Ok(Self::Unknown),
            "Waiting" => Ok(Self::Waiting),
            "Running" => Ok(Self::Running),
            "Succeeded" => Ok(Self::Succeeded),
            "Failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid replica state: {s}")),
        }
    }
}
