//! Cross-job registry fronting the lifecycle core
//!
//! Maps each runtime ID to the command queue of its owning actor. Jobs are
//! fully independent: operations on different runtime IDs never contend, and
//! a failure stays scoped to its job.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::info;

use super::job_actor::{JobActor, JobCommand};
use crate::config::CoreConfig;
use crate::constants::reasons;
use crate::error::{Result, TFJobError};
use crate::events::{StatusChanged, StatusPublisher};
use crate::models::{ConditionStatus, TFJobConditionType, TFJobSpec, TFJobStatus};
use crate::state_machine::{
    JobPhaseMachine, ReplicaAggregator, ReplicaObservation, TFJobPhase,
};
use crate::validation::validate_job_spec;

struct JobHandle {
    commands: mpsc::Sender<JobCommand>,
    retire: watch::Sender<bool>,
}

/// Entry point used by the reconciliation loop: admits jobs, routes replica
/// observations to the owning actor, answers status queries, and retires jobs
/// the external store has deleted.
pub struct JobRegistry {
    config: CoreConfig,
    publisher: StatusPublisher,
    jobs: DashMap<String, JobHandle>,
}

impl JobRegistry {
    pub fn new(config: CoreConfig) -> Self {
        let publisher = StatusPublisher::new(config.status_channel_capacity);
        Self {
            config,
            publisher,
            jobs: DashMap::new(),
        }
    }

    /// Subscribe to status changes across all managed jobs
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StatusChanged> {
        self.publisher.subscribe()
    }

    /// Admit a new job: validate its spec, spawn the owning actor, and return
    /// the initial pending status.
    pub async fn admit_job(&self, spec: TFJobSpec) -> Result<TFJobStatus> {
        let admitted = validate_job_spec(&spec)?;
        let runtime_id = admitted.runtime_id.clone();

        let aggregator = ReplicaAggregator::new(&admitted.groups);
        let mut status = TFJobStatus {
            phase: TFJobPhase::Pending,
            ..Default::default()
        };
        status.record_condition(
            TFJobConditionType::Scheduled,
            ConditionStatus::True,
            reasons::JOB_ADMITTED,
            Utc::now(),
        );
        status.tf_replica_statuses = aggregator.statuses();

        let (command_tx, command_rx) = mpsc::channel(self.config.observation_queue_depth);
        let (retire_tx, retire_rx) = watch::channel(false);

        match self.jobs.entry(runtime_id.clone()) {
            Entry::Occupied(_) => {
                return Err(TFJobError::ValidationError(format!(
                    "job with runtime ID {runtime_id} is already managed"
                )));
            }
            Entry::Vacant(entry) => {
                entry.insert(JobHandle {
                    commands: command_tx,
                    retire: retire_tx,
                });
            }
        }

        let actor = JobActor::new(
            runtime_id.clone(),
            status.clone(),
            aggregator,
            JobPhaseMachine::new(admitted.chief),
            self.publisher.clone(),
            command_rx,
            retire_rx,
        );
        tokio::spawn(actor.run());

        let _ = self
            .publisher
            .publish(runtime_id.clone(), status.clone())
            .await;

        info!(
            runtime_id = %runtime_id,
            groups = status.tf_replica_statuses.len(),
            "Job admitted"
        );
        Ok(status)
    }

    /// Deliver one replica observation to the owning actor's queue. Safe to
    /// call concurrently across runtime IDs.
    pub async fn apply_observation(
        &self,
        runtime_id: &str,
        observation: ReplicaObservation,
    ) -> Result<()> {
        let commands = {
            let handle = self
                .jobs
                .get(runtime_id)
                .ok_or_else(|| TFJobError::JobNotFound(runtime_id.to_string()))?;
            handle.commands.clone()
        };

        commands
            .send(JobCommand::Observe(observation))
            .await
            .map_err(|_| {
                TFJobError::ObservationError(format!(
                    "job {runtime_id} is no longer accepting observations"
                ))
            })
    }

    /// Current status of a job, answered by its owning actor.
    pub async fn status(&self, runtime_id: &str) -> Result<TFJobStatus> {
        let commands = {
            let handle = self
                .jobs
                .get(runtime_id)
                .ok_or_else(|| TFJobError::JobNotFound(runtime_id.to_string()))?;
            handle.commands.clone()
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        commands
            .send(JobCommand::Query(reply_tx))
            .await
            .map_err(|_| TFJobError::JobNotFound(runtime_id.to_string()))?;
        reply_rx
            .await
            .map_err(|_| TFJobError::JobNotFound(runtime_id.to_string()))
    }

    /// Stop accepting updates for a job. Observations still queued are
    /// discarded; later calls for this runtime ID fail with `JobNotFound`.
    pub fn retire(&self, runtime_id: &str) -> Result<()> {
        let (_, handle) = self
            .jobs
            .remove(runtime_id)
            .ok_or_else(|| TFJobError::JobNotFound(runtime_id.to_string()))?;
        let _ = handle.retire.send(true);

        info!(runtime_id = %runtime_id, "Job retired");
        Ok(())
    }

    /// Number of jobs currently managed
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new(CoreConfig::default())
    }
}
