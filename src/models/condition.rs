use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of timestamped facts recorded about job progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TFJobConditionType {
    /// The job was accepted and its replica groups can be scheduled.
    Scheduled,
    /// At least one replica process is running.
    Ready,
    /// Process state is temporarily unobservable and being re-established.
    Recovering,
    /// The job finished and leftover replica processes are being reclaimed.
    Recycling,
}

impl fmt::Display for TFJobConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "Scheduled"),
            Self::Ready => write!(f, "Ready"),
            Self::Recovering => write!(f, "Recovering"),
            Self::Recycling => write!(f, "Recycling"),
        }
    }
}

/// Tri-state status of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "True"),
            Self::False => write!(f, "False"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One entry in a job's bounded condition history.
///
/// `last_transition_time` is stamped when the condition's status changes;
/// reason-only updates rewrite the latest entry in place and leave the
/// timestamp untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TFJobCondition {
    #[serde(rename = "type")]
    pub condition_type: TFJobConditionType,
    pub status: ConditionStatus,
    #[serde(default)]
    pub reason: String,
    #[serde(
        rename = "lastTransitionTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_transition_time: Option<DateTime<Utc>>,
}

impl TFJobCondition {
    pub fn new(
        condition_type: TFJobConditionType,
        status: ConditionStatus,
        reason: impl Into<String>,
        transition_time: DateTime<Utc>,
    ) -> Self {
        Self {
            condition_type,
            status,
            reason: reason.into(),
            last_transition_time: Some(transition_time),
        }
    }
}
