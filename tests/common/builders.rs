//! Builders for job specs used across the integration tests.

use tfjob_core::models::{
    ChiefSpec, TFJobSpec, TFReplicaSpec, TFReplicaType, TerminationPolicySpec,
};

/// A replica group of the given role and size.
pub fn replica_group(replica_type: TFReplicaType, replicas: i32) -> TFReplicaSpec {
    TFReplicaSpec {
        replicas: Some(replicas),
        tf_replica_type: Some(replica_type),
        ..Default::default()
    }
}

/// Attach a chief termination policy to a replica group.
pub fn with_chief(mut group: TFReplicaSpec, name: &str, index: i32) -> TFReplicaSpec {
    group.termination_policy = Some(TerminationPolicySpec {
        chief: Some(ChiefSpec {
            tf_replica_name: name.to_string(),
            tf_replica_index: index,
        }),
    });
    group
}

/// A job spec with the given runtime ID and replica groups.
pub fn job_spec(runtime_id: &str, groups: Vec<TFReplicaSpec>) -> TFJobSpec {
    TFJobSpec {
        runtime_id: runtime_id.to_string(),
        specs: groups,
        ..Default::default()
    }
}
