use super::replica_aggregator::ReplicaAggregator;
use super::states::{TFJobPhase, TFReplicaState};
use crate::constants::reasons;
use crate::models::TFReplicaType;

/// The single process whose completion decides the job outcome under a
/// termination policy, resolved to a concrete slot at admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChiefTarget {
    pub replica_type: TFReplicaType,
    pub index: usize,
}

/// Result of one phase evaluation. An empty reason means the transition is
/// normal progress and the previous reason should be kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseDecision {
    pub phase: TFJobPhase,
    pub reason: String,
}

impl PhaseDecision {
    fn progress(phase: TFJobPhase) -> Self {
        Self {
            phase,
            reason: String::new(),
        }
    }

    fn with_reason(phase: TFJobPhase, reason: String) -> Self {
        Self { phase, reason }
    }
}

/// Job lifecycle model: decides the job phase from the aggregated replica
/// states and the termination policy.
///
/// Terminal phases are sticky. Once a job is succeeded or failed, later
/// replica-state changes update tallies and conditions but never the phase.
#[derive(Debug, Clone)]
pub struct JobPhaseMachine {
    chief: Option<ChiefTarget>,
}

impl JobPhaseMachine {
    pub fn new(chief: Option<ChiefTarget>) -> Self {
        Self { chief }
    }

    pub fn chief(&self) -> Option<&ChiefTarget> {
        self.chief.as_ref()
    }

    /// Whether failures of the given group leave the job outcome untouched.
    ///
    /// Parameter servers are non-terminating helpers; when a chief outside
    /// the PS group governs completion, their failures are expected during
    /// teardown and tolerated. Without a chief every group must succeed, so
    /// nothing is tolerated.
    pub fn failure_tolerated(&self, replica_type: TFReplicaType) -> bool {
        match &self.chief {
            Some(chief) => {
                replica_type.is_non_terminating() && chief.replica_type != replica_type
            }
            None => false,
        }
    }

    /// Evaluate the job phase against the current aggregation.
    pub fn evaluate(&self, aggregator: &ReplicaAggregator, current: TFJobPhase) -> PhaseDecision {
        if current.is_terminal() {
            return PhaseDecision::progress(current);
        }

        if let Some((replica_type, index)) = aggregator
            .failed_slots()
            .into_iter()
            .find(|(replica_type, _)| !self.failure_tolerated(*replica_type))
        {
            return PhaseDecision::with_reason(
                TFJobPhase::Failed,
                format!(
                    "{}: {replica_type} replica {index} terminated in failure",
                    reasons::REPLICA_FAILED
                ),
            );
        }

        if let Some(chief) = &self.chief {
            if aggregator.state_of(chief.replica_type, chief.index)
                == Some(TFReplicaState::Succeeded)
            {
                return PhaseDecision::with_reason(
                    TFJobPhase::Succeeded,
                    format!(
                        "{}: {} replica {} terminated successfully",
                        reasons::CHIEF_SUCCEEDED,
                        chief.replica_type,
                        chief.index
                    ),
                );
            }
        } else if aggregator.all_succeeded() {
            return PhaseDecision::with_reason(
                TFJobPhase::Succeeded,
                reasons::ALL_REPLICAS_SUCCEEDED.to_string(),
            );
        }

        if aggregator.any_unknown() {
            return PhaseDecision::with_reason(
                TFJobPhase::Unknown,
                reasons::REPLICA_STATE_UNKNOWN.to_string(),
            );
        }

        if aggregator.any_started() {
            // Leaving the unknown side-state is worth an audit trail entry;
            // plain pending-to-running progress is not.
            if current == TFJobPhase::Unknown {
                return PhaseDecision::with_reason(
                    TFJobPhase::Running,
                    reasons::STATUS_RESTORED.to_string(),
                );
            }
            return PhaseDecision::progress(TFJobPhase::Running);
        }

        PhaseDecision::progress(TFJobPhase::Pending)
    }
}
