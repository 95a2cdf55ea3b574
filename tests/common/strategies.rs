//! Proptest strategies for the aggregation and condition-history invariants.

use proptest::prelude::*;

use tfjob_core::models::{ConditionStatus, TFJobConditionType, TFReplicaType};
use tfjob_core::state_machine::{ReplicaObservation, TFReplicaState};

pub fn replica_type_strategy() -> impl Strategy<Value = TFReplicaType> {
    prop_oneof![
        Just(TFReplicaType::PS),
        Just(TFReplicaType::Worker),
        Just(TFReplicaType::Local),
    ]
}

pub fn replica_state_strategy() -> impl Strategy<Value = TFReplicaState> {
    prop_oneof![
        Just(TFReplicaState::Unknown),
        Just(TFReplicaState::Waiting),
        Just(TFReplicaState::Running),
        Just(TFReplicaState::Succeeded),
        Just(TFReplicaState::Failed),
    ]
}

/// Observations with indexes up to `max_index`, covering both declared slots
/// and out-of-range deliveries.
pub fn observation_strategy(max_index: usize) -> impl Strategy<Value = ReplicaObservation> {
    (replica_type_strategy(), 0..max_index, replica_state_strategy())
        .prop_map(|(replica_type, index, state)| ReplicaObservation::new(replica_type, index, state))
}

pub fn observation_sequence_strategy(
    max_index: usize,
    max_len: usize,
) -> impl Strategy<Value = Vec<ReplicaObservation>> {
    prop::collection::vec(observation_strategy(max_index), 0..max_len)
}

pub fn condition_type_strategy() -> impl Strategy<Value = TFJobConditionType> {
    prop_oneof![
        Just(TFJobConditionType::Scheduled),
        Just(TFJobConditionType::Ready),
        Just(TFJobConditionType::Recovering),
        Just(TFJobConditionType::Recycling),
    ]
}

pub fn condition_status_strategy() -> impl Strategy<Value = ConditionStatus> {
    prop_oneof![
        Just(ConditionStatus::True),
        Just(ConditionStatus::False),
        Just(ConditionStatus::Unknown),
    ]
}

pub fn condition_sequence_strategy(
    max_len: usize,
) -> impl Strategy<Value = Vec<(TFJobConditionType, ConditionStatus, u8)>> {
    prop::collection::vec(
        (condition_type_strategy(), condition_status_strategy(), 0..4u8),
        0..max_len,
    )
}
