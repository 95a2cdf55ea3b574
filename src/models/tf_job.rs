use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};

use crate::constants::{DEFAULT_REPLICAS, MAX_RECENT_CONDITIONS};
use crate::models::condition::{ConditionStatus, TFJobCondition, TFJobConditionType};
use crate::models::replica::{TFReplicaStatus, TFReplicaType};
use crate::state_machine::states::TFJobPhase;

/// One distributed training job: the declared replica groups plus the status
/// maintained by the lifecycle core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TFJob {
    pub spec: TFJobSpec,
    #[serde(default)]
    pub status: TFJobStatus,
}

impl TFJob {
    pub fn new(spec: TFJobSpec) -> Self {
        Self {
            spec,
            status: TFJobStatus::default(),
        }
    }
}

/// Declarative spec of a training job.
///
/// The storage directories are opaque strings handed through to the launched
/// processes; the core never interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TFJobSpec {
    /// Identifier of the job in the runtime, unique per job instance.
    #[serde(rename = "runtimeID", default)]
    pub runtime_id: String,
    #[serde(rename = "dataDir", default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(rename = "modelDir", default, skip_serializing_if = "Option::is_none")]
    pub model_dir: Option<String>,
    #[serde(rename = "logDir", default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
    #[serde(rename = "exportDir", default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
    /// Replica groups making up the job. If empty the job cannot be scheduled.
    #[serde(rename = "tfReplicaSpec", default)]
    pub specs: Vec<TFReplicaSpec>,
}

/// Spec of one replica group within a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TFReplicaSpec {
    /// Desired process count. Defaults to 1 when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Role of this group. Required for the job to be admitted.
    #[serde(
        rename = "tfReplicaType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tf_replica_type: Option<TFReplicaType>,
    /// Opaque workload-launch template for the group's processes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
    /// Condition under which the job as a whole is considered finished.
    #[serde(
        rename = "terminationPolicy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub termination_policy: Option<TerminationPolicySpec>,
}

impl TFReplicaSpec {
    /// Declared process count, applying the default for an absent field.
    pub fn effective_replicas(&self) -> i32 {
        self.replicas.unwrap_or(DEFAULT_REPLICAS)
    }
}

/// Termination policy: the job finishes when a designated chief process exits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerminationPolicySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chief: Option<ChiefSpec>,
}

/// Identifies the chief process by replica-type name and index within the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChiefSpec {
    #[serde(rename = "tfReplicaName")]
    pub tf_replica_name: String,
    #[serde(rename = "tfReplicaIndex")]
    pub tf_replica_index: i32,
}

/// Status of a training job, mutated exclusively by the owning lifecycle actor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TFJobStatus {
    #[serde(default)]
    pub phase: TFJobPhase,
    #[serde(default)]
    pub reason: String,
    /// Ten most recent conditions, oldest first.
    #[serde(default)]
    pub conditions: VecDeque<TFJobCondition>,
    /// Aggregated status per replica group.
    #[serde(rename = "tfReplicaStatuses", default)]
    pub tf_replica_statuses: BTreeMap<TFReplicaType, TFReplicaStatus>,
}

impl TFJobStatus {
    /// Latest condition entry of the given type, if any.
    pub fn condition(&self, condition_type: TFJobConditionType) -> Option<&TFJobCondition> {
        self.conditions
            .iter()
            .rev()
            .find(|c| c.condition_type == condition_type)
    }

    /// Record a condition, respecting the bounded history.
    ///
    /// If the latest entry of this type already carries the given status only
    /// the reason is rewritten in place; a status change appends a new entry
    /// stamped with `transition_time`, evicting the oldest entry once the
    /// history holds [`MAX_RECENT_CONDITIONS`] of them.
    ///
    /// Returns `true` when the history changed.
    pub fn record_condition(
        &mut self,
        condition_type: TFJobConditionType,
        status: ConditionStatus,
        reason: impl Into<String>,
        transition_time: DateTime<Utc>,
    ) -> bool {
        let reason = reason.into();

        if let Some(current) = self
            .conditions
            .iter_mut()
            .rev()
            .find(|c| c.condition_type == condition_type)
        {
            if current.status == status {
                if current.reason == reason {
                    return false;
                }
                current.reason = reason;
                return true;
            }
        }

        if self.conditions.len() == MAX_RECENT_CONDITIONS {
            self.conditions.pop_front();
        }
        self.conditions.push_back(TFJobCondition::new(
            condition_type,
            status,
            reason,
            transition_time,
        ));
        true
    }
}
