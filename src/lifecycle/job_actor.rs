//! Per-job lifecycle actor
//!
//! One actor task owns all mutable state of one job. Observations and status
//! queries arrive on a serialized command queue, so phase evaluation never
//! sees a partially applied aggregation and condition-history updates keep a
//! total order without locking.

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::events::StatusPublisher;
use crate::models::{ConditionStatus, TFJobConditionType, TFJobStatus};
use crate::state_machine::{
    AppliedObservation, JobPhaseMachine, ReplicaAggregator, ReplicaObservation, TFJobPhase,
};

/// Commands consumed by a job's actor.
pub(crate) enum JobCommand {
    Observe(ReplicaObservation),
    Query(oneshot::Sender<TFJobStatus>),
}

pub(crate) struct JobActor {
    runtime_id: String,
    status: TFJobStatus,
    aggregator: ReplicaAggregator,
    phase_machine: JobPhaseMachine,
    publisher: StatusPublisher,
    commands: mpsc::Receiver<JobCommand>,
    retired: watch::Receiver<bool>,
}

impl JobActor {
    pub(crate) fn new(
        runtime_id: String,
        status: TFJobStatus,
        aggregator: ReplicaAggregator,
        phase_machine: JobPhaseMachine,
        publisher: StatusPublisher,
        commands: mpsc::Receiver<JobCommand>,
        retired: watch::Receiver<bool>,
    ) -> Self {
        Self {
            runtime_id,
            status,
            aggregator,
            phase_machine,
            publisher,
            commands,
            retired,
        }
    }

    /// Consume commands until the job is retired or every sender is gone.
    /// Retirement wins over queued commands: anything still in the queue is
    /// dropped unapplied.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                _ = self.retired.changed() => {
                    debug!(runtime_id = %self.runtime_id, "Job retired, discarding pending updates");
                    break;
                }
                command = self.commands.recv() => match command {
                    Some(JobCommand::Observe(observation)) => {
                        self.handle_observation(observation).await;
                    }
                    Some(JobCommand::Query(reply)) => {
                        let _ = reply.send(self.status.clone());
                    }
                    None => break,
                },
            }
        }
        debug!(runtime_id = %self.runtime_id, "Job actor stopped");
    }

    async fn handle_observation(&mut self, observation: ReplicaObservation) {
        match self.aggregator.apply(&observation) {
            AppliedObservation::Rejected => {
                warn!(
                    runtime_id = %self.runtime_id,
                    replica_type = %observation.replica_type,
                    index = observation.index,
                    state = %observation.state,
                    "Dropping observation outside the declared replica groups"
                );
            }
            AppliedObservation::Unchanged => {}
            AppliedObservation::Changed => {
                let previous = self.status.clone();
                let now = Utc::now();

                self.status.tf_replica_statuses = self.aggregator.statuses();

                let decision = self.phase_machine.evaluate(&self.aggregator, previous.phase);
                if decision.phase != previous.phase {
                    info!(
                        runtime_id = %self.runtime_id,
                        from = %previous.phase,
                        to = %decision.phase,
                        reason = %decision.reason,
                        "Job phase transition"
                    );
                    self.status.phase = decision.phase;
                    if !decision.reason.is_empty() {
                        self.status.reason = decision.reason;
                    }
                    self.record_transition_conditions(previous.phase, now);
                }
                self.record_recycling_progress(now);

                if self.status != previous {
                    let _ = self
                        .publisher
                        .publish(self.runtime_id.clone(), self.status.clone())
                        .await;
                }
            }
        }
    }

    /// Append the condition entries implied by a phase transition.
    fn record_transition_conditions(&mut self, from: TFJobPhase, now: DateTime<Utc>) {
        use crate::constants::reasons;

        match self.status.phase {
            TFJobPhase::Running => {
                self.status.record_condition(
                    TFJobConditionType::Ready,
                    ConditionStatus::True,
                    reasons::REPLICAS_STARTED,
                    now,
                );
            }
            TFJobPhase::Unknown => {
                self.status.record_condition(
                    TFJobConditionType::Recovering,
                    ConditionStatus::True,
                    reasons::REPLICA_STATE_UNKNOWN,
                    now,
                );
            }
            TFJobPhase::Succeeded => {
                // Success through a chief leaves the other groups behind;
                // flag their teardown until every group reaches a terminal state.
                if self.phase_machine.chief().is_some() && !self.aggregator.all_terminal() {
                    self.status.record_condition(
                        TFJobConditionType::Recycling,
                        ConditionStatus::True,
                        reasons::RECYCLING_RESOURCES,
                        now,
                    );
                }
            }
            _ => {}
        }

        if from == TFJobPhase::Unknown && self.status.phase != TFJobPhase::Unknown {
            self.status.record_condition(
                TFJobConditionType::Recovering,
                ConditionStatus::False,
                reasons::STATUS_RESTORED,
                now,
            );
        }
    }

    /// After the job has finished, track leftover-group teardown on the
    /// condition history. The phase itself stays untouched.
    fn record_recycling_progress(&mut self, now: DateTime<Utc>) {
        use crate::constants::reasons;

        if !self.status.phase.is_terminal() {
            return;
        }
        let recycling_active = self
            .status
            .condition(TFJobConditionType::Recycling)
            .map(|c| c.status == ConditionStatus::True)
            .unwrap_or(false);

        if recycling_active && self.aggregator.all_terminal() {
            self.status.record_condition(
                TFJobConditionType::Recycling,
                ConditionStatus::False,
                reasons::RECYCLE_COMPLETE,
                now,
            );
        }
    }
}
