//! Admission validation for TFJob specs
//!
//! Checks the structural invariants a job must satisfy before a lifecycle
//! actor is spawned for it: a non-empty replica group list, sane replica
//! counts, and a termination policy that resolves to an existing process slot.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::{Result, TFJobError};
use crate::models::{TFJobSpec, TFReplicaType};
use crate::state_machine::ChiefTarget;

/// A job spec that passed admission, reduced to what the lifecycle core
/// operates on.
#[derive(Debug, Clone)]
pub struct AdmittedJob {
    pub runtime_id: String,
    /// Declared replica count per group.
    pub groups: BTreeMap<TFReplicaType, i32>,
    /// Chief slot resolved from the termination policy, if one is configured.
    pub chief: Option<ChiefTarget>,
}

/// Validate a job spec against the admission invariants.
///
/// A spec without a runtime ID is assigned a fresh one so the job stays
/// addressable by the lifecycle core.
pub fn validate_job_spec(spec: &TFJobSpec) -> Result<AdmittedJob> {
    if spec.specs.is_empty() {
        return Err(TFJobError::ConfigurationError(
            "tfReplicaSpec is empty; the job cannot be scheduled".to_string(),
        ));
    }

    let mut groups = BTreeMap::new();
    for (position, replica_spec) in spec.specs.iter().enumerate() {
        let replica_type = replica_spec.tf_replica_type.ok_or_else(|| {
            TFJobError::ConfigurationError(format!(
                "replica group at position {position} is missing tfReplicaType"
            ))
        })?;

        let replicas = replica_spec.effective_replicas();
        if replicas < 0 {
            return Err(TFJobError::ConfigurationError(format!(
                "{replica_type} group declares a negative replica count: {replicas}"
            )));
        }

        if groups.insert(replica_type, replicas).is_some() {
            return Err(TFJobError::ConfigurationError(format!(
                "{replica_type} group is declared more than once"
            )));
        }
    }

    let chief = resolve_chief(spec, &groups)?;

    let runtime_id = if spec.runtime_id.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        spec.runtime_id.clone()
    };

    Ok(AdmittedJob {
        runtime_id,
        groups,
        chief,
    })
}

/// Resolve the termination policy's chief reference to a declared slot.
fn resolve_chief(
    spec: &TFJobSpec,
    groups: &BTreeMap<TFReplicaType, i32>,
) -> Result<Option<ChiefTarget>> {
    let mut policies = spec
        .specs
        .iter()
        .filter_map(|s| s.termination_policy.as_ref());

    let Some(policy) = policies.next() else {
        return Ok(None);
    };
    if policies.next().is_some() {
        return Err(TFJobError::ConfigurationError(
            "more than one replica group declares a termination policy".to_string(),
        ));
    }

    let Some(chief) = &policy.chief else {
        return Ok(None);
    };

    let replica_type: TFReplicaType = chief.tf_replica_name.parse().map_err(|_| {
        TFJobError::ConfigurationError(format!(
            "termination policy names unknown replica type: {}",
            chief.tf_replica_name
        ))
    })?;

    let declared = *groups.get(&replica_type).ok_or_else(|| {
        TFJobError::ConfigurationError(format!(
            "termination policy references undeclared {replica_type} group"
        ))
    })?;

    if chief.tf_replica_index < 0 || chief.tf_replica_index >= declared {
        return Err(TFJobError::ConfigurationError(format!(
            "termination policy index {} is outside the {replica_type} group of {declared} replicas",
            chief.tf_replica_index
        )));
    }

    Ok(Some(ChiefTarget {
        replica_type,
        index: chief.tf_replica_index as usize,
    }))
}
