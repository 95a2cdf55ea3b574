use std::collections::BTreeMap;

use super::events::ReplicaObservation;
use super::states::TFReplicaState;
use crate::models::{TFReplicaStatus, TFReplicaType};

/// Outcome of applying one observation to the aggregation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedObservation {
    /// The observation changed a slot's state.
    Changed,
    /// The observation re-delivered the slot's current state.
    Unchanged,
    /// The observation referenced an undeclared group or an index outside the
    /// declared replica count and was dropped.
    Rejected,
}

/// Per-job aggregation of individual process states into per-group tallies.
///
/// Keeps the latest observed state per `(type, index)` slot and recomputes all
/// counts from that snapshot, never from deltas, so re-delivered observations
/// are idempotent. Slots start out `Waiting`, which keeps every tally summing
/// to the group's declared replica count from admission onward.
#[derive(Debug, Clone)]
pub struct ReplicaAggregator {
    slots: BTreeMap<TFReplicaType, Vec<TFReplicaState>>,
}

impl ReplicaAggregator {
    /// Build the aggregator for the declared replica groups, every slot in
    /// the waiting state.
    pub fn new(groups: &BTreeMap<TFReplicaType, i32>) -> Self {
        let slots = groups
            .iter()
            .map(|(replica_type, replicas)| {
                (*replica_type, vec![TFReplicaState::Waiting; *replicas as usize])
            })
            .collect();
        Self { slots }
    }

    /// Apply one observation, keeping the latest state per slot.
    pub fn apply(&mut self, observation: &ReplicaObservation) -> AppliedObservation {
        let Some(group) = self.slots.get_mut(&observation.replica_type) else {
            return AppliedObservation::Rejected;
        };
        let Some(slot) = group.get_mut(observation.index) else {
            return AppliedObservation::Rejected;
        };

        if *slot == observation.state {
            return AppliedObservation::Unchanged;
        }
        *slot = observation.state;
        AppliedObservation::Changed
    }

    /// Latest observed state of one process slot.
    pub fn state_of(&self, replica_type: TFReplicaType, index: usize) -> Option<TFReplicaState> {
        self.slots
            .get(&replica_type)
            .and_then(|group| group.get(index))
            .copied()
    }

    /// Overall state of one group, `None` for an undeclared group.
    pub fn overall_state(&self, replica_type: TFReplicaType) -> Option<TFReplicaState> {
        self.slots.get(&replica_type).map(|g| derive_state(g))
    }

    /// Per-state process counts for one group.
    pub fn tally(&self, replica_type: TFReplicaType) -> BTreeMap<TFReplicaState, usize> {
        let mut tally = BTreeMap::new();
        if let Some(group) = self.slots.get(&replica_type) {
            for state in group {
                *tally.entry(*state).or_insert(0) += 1;
            }
        }
        tally
    }

    /// Snapshot of every group's aggregated status.
    pub fn statuses(&self) -> BTreeMap<TFReplicaType, TFReplicaStatus> {
        self.slots
            .keys()
            .map(|replica_type| {
                (
                    *replica_type,
                    TFReplicaStatus::new(
                        *replica_type,
                        derive_state(&self.slots[replica_type]),
                        self.tally(*replica_type),
                    ),
                )
            })
            .collect()
    }

    /// Whether any process has left the waiting state.
    pub fn any_started(&self) -> bool {
        self.slots
            .values()
            .flatten()
            .any(|state| state.has_started())
    }

    /// Whether any group's overall state is unobservable.
    pub fn any_unknown(&self) -> bool {
        self.slots
            .values()
            .any(|group| derive_state(group) == TFReplicaState::Unknown)
    }

    /// Whether every group reports overall success. Groups declared with zero
    /// replicas are vacuously successful.
    pub fn all_succeeded(&self) -> bool {
        self.slots
            .values()
            .all(|group| derive_state(group) == TFReplicaState::Succeeded)
    }

    /// Every `(type, index)` slot currently in the failed state.
    pub fn failed_slots(&self) -> Vec<(TFReplicaType, usize)> {
        self.slots
            .iter()
            .flat_map(|(replica_type, group)| {
                group.iter().enumerate().filter_map(move |(index, state)| {
                    (*state == TFReplicaState::Failed).then_some((*replica_type, index))
                })
            })
            .collect()
    }

    /// Whether every group has reached a terminal overall state.
    pub fn all_terminal(&self) -> bool {
        self.slots
            .values()
            .all(|group| derive_state(group).is_terminal())
    }
}

/// Overall state of one group by precedence: a failed process dominates, then
/// a running one, then unanimous success, then a waiting process. An empty
/// group is vacuously successful.
fn derive_state(group: &[TFReplicaState]) -> TFReplicaState {
    if group.iter().any(|s| *s == TFReplicaState::Failed) {
        TFReplicaState::Failed
    } else if group.iter().any(|s| *s == TFReplicaState::Running) {
        TFReplicaState::Running
    } else if group.iter().all(|s| *s == TFReplicaState::Succeeded) {
        TFReplicaState::Succeeded
    } else if group.iter().any(|s| *s == TFReplicaState::Waiting) {
        TFReplicaState::Waiting
    } else {
        TFReplicaState::Unknown
    }
}
