mod common;

use anyhow::Result;
use common::*;

use tfjob_core::error::TFJobError;
use tfjob_core::lifecycle::JobRegistry;
use tfjob_core::models::{ConditionStatus, TFJobConditionType, TFReplicaType};
use tfjob_core::state_machine::{ReplicaObservation, TFJobPhase, TFReplicaState};

#[tokio::test]
async fn single_worker_job_runs_to_completion() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec("job-1", vec![replica_group(TFReplicaType::Worker, 1)]);

    let status = registry.admit_job(spec).await?;
    assert_eq!(status.phase, TFJobPhase::Pending);
    let scheduled = status.condition(TFJobConditionType::Scheduled).unwrap();
    assert_eq!(scheduled.status, ConditionStatus::True);
    let worker = &status.tf_replica_statuses[&TFReplicaType::Worker];
    assert_eq!(worker.state, TFReplicaState::Waiting);
    assert_eq!(worker.count_in(TFReplicaState::Waiting), 1);

    registry
        .apply_observation("job-1", ReplicaObservation::running(TFReplicaType::Worker, 0))
        .await?;
    let status = registry.status("job-1").await?;
    assert_eq!(status.phase, TFJobPhase::Running);
    let ready = status.condition(TFJobConditionType::Ready).unwrap();
    assert_eq!(ready.status, ConditionStatus::True);

    registry
        .apply_observation(
            "job-1",
            ReplicaObservation::succeeded(TFReplicaType::Worker, 0),
        )
        .await?;
    let status = registry.status("job-1").await?;
    assert_eq!(status.phase, TFJobPhase::Succeeded);
    assert_eq!(status.reason, "AllReplicasSucceeded");
    let worker = &status.tf_replica_statuses[&TFReplicaType::Worker];
    assert_eq!(worker.state, TFReplicaState::Succeeded);
    assert_eq!(worker.count_in(TFReplicaState::Succeeded), 1);

    Ok(())
}

#[tokio::test]
async fn chief_success_finishes_job_while_ps_keeps_running() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec(
        "job-chief",
        vec![
            with_chief(replica_group(TFReplicaType::Worker, 1), "Worker", 0),
            replica_group(TFReplicaType::PS, 1),
        ],
    );
    registry.admit_job(spec).await?;

    registry
        .apply_observation("job-chief", ReplicaObservation::running(TFReplicaType::PS, 0))
        .await?;
    registry
        .apply_observation(
            "job-chief",
            ReplicaObservation::succeeded(TFReplicaType::Worker, 0),
        )
        .await?;

    let status = registry.status("job-chief").await?;
    assert_eq!(status.phase, TFJobPhase::Succeeded);
    assert!(status.reason.starts_with("ChiefSucceeded"));
    assert_eq!(
        status.tf_replica_statuses[&TFReplicaType::PS].state,
        TFReplicaState::Running
    );
    // Leftover PS teardown is tracked on the condition history.
    let recycling = status.condition(TFJobConditionType::Recycling).unwrap();
    assert_eq!(recycling.status, ConditionStatus::True);

    // Once the PS group is gone the recycle is complete; the phase is untouched.
    registry
        .apply_observation(
            "job-chief",
            ReplicaObservation::succeeded(TFReplicaType::PS, 0),
        )
        .await?;
    let status = registry.status("job-chief").await?;
    assert_eq!(status.phase, TFJobPhase::Succeeded);
    let recycling = status.condition(TFJobConditionType::Recycling).unwrap();
    assert_eq!(recycling.status, ConditionStatus::False);
    assert_eq!(recycling.reason, "RecycleComplete");

    Ok(())
}

#[tokio::test]
async fn without_policy_all_workers_must_succeed() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec("job-2w", vec![replica_group(TFReplicaType::Worker, 2)]);
    registry.admit_job(spec).await?;

    registry
        .apply_observation(
            "job-2w",
            ReplicaObservation::succeeded(TFReplicaType::Worker, 0),
        )
        .await?;
    let status = registry.status("job-2w").await?;
    assert_eq!(status.phase, TFJobPhase::Running);

    registry
        .apply_observation(
            "job-2w",
            ReplicaObservation::succeeded(TFReplicaType::Worker, 1),
        )
        .await?;
    let status = registry.status("job-2w").await?;
    assert_eq!(status.phase, TFJobPhase::Succeeded);

    Ok(())
}

#[tokio::test]
async fn terminal_phase_is_sticky_against_late_failures() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec(
        "job-sticky",
        vec![
            with_chief(replica_group(TFReplicaType::Worker, 1), "Worker", 0),
            replica_group(TFReplicaType::PS, 1),
        ],
    );
    registry.admit_job(spec).await?;

    registry
        .apply_observation(
            "job-sticky",
            ReplicaObservation::succeeded(TFReplicaType::Worker, 0),
        )
        .await?;
    registry
        .apply_observation("job-sticky", ReplicaObservation::failed(TFReplicaType::PS, 0))
        .await?;

    let status = registry.status("job-sticky").await?;
    assert_eq!(status.phase, TFJobPhase::Succeeded);
    assert_eq!(
        status.tf_replica_statuses[&TFReplicaType::PS].state,
        TFReplicaState::Failed
    );

    Ok(())
}

#[tokio::test]
async fn worker_failure_fails_the_job() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec("job-fail", vec![replica_group(TFReplicaType::Worker, 2)]);
    registry.admit_job(spec).await?;

    registry
        .apply_observation(
            "job-fail",
            ReplicaObservation::running(TFReplicaType::Worker, 0),
        )
        .await?;
    registry
        .apply_observation(
            "job-fail",
            ReplicaObservation::failed(TFReplicaType::Worker, 1),
        )
        .await?;

    let status = registry.status("job-fail").await?;
    assert_eq!(status.phase, TFJobPhase::Failed);
    assert!(status.reason.starts_with("ReplicaFailed"));

    Ok(())
}

#[tokio::test]
async fn unknown_phase_is_transient() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec("job-unk", vec![replica_group(TFReplicaType::Worker, 1)]);
    registry.admit_job(spec).await?;

    registry
        .apply_observation("job-unk", ReplicaObservation::running(TFReplicaType::Worker, 0))
        .await?;
    registry
        .apply_observation("job-unk", ReplicaObservation::unknown(TFReplicaType::Worker, 0))
        .await?;

    let status = registry.status("job-unk").await?;
    assert_eq!(status.phase, TFJobPhase::Unknown);
    let recovering = status.condition(TFJobConditionType::Recovering).unwrap();
    assert_eq!(recovering.status, ConditionStatus::True);

    registry
        .apply_observation("job-unk", ReplicaObservation::running(TFReplicaType::Worker, 0))
        .await?;
    let status = registry.status("job-unk").await?;
    assert_eq!(status.phase, TFJobPhase::Running);
    assert_eq!(status.reason, "StatusRestored");
    let recovering = status.condition(TFJobConditionType::Recovering).unwrap();
    assert_eq!(recovering.status, ConditionStatus::False);

    Ok(())
}

#[tokio::test]
async fn redelivered_observation_changes_nothing() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec("job-idem", vec![replica_group(TFReplicaType::Worker, 1)]);
    registry.admit_job(spec).await?;

    let observation = ReplicaObservation::running(TFReplicaType::Worker, 0);
    registry
        .apply_observation("job-idem", observation.clone())
        .await?;
    let first = registry.status("job-idem").await?;

    registry.apply_observation("job-idem", observation).await?;
    let second = registry.status("job-idem").await?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn out_of_range_observation_is_dropped() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec("job-oob", vec![replica_group(TFReplicaType::Worker, 1)]);
    let admitted = registry.admit_job(spec).await?;

    registry
        .apply_observation("job-oob", ReplicaObservation::running(TFReplicaType::Worker, 5))
        .await?;
    registry
        .apply_observation("job-oob", ReplicaObservation::running(TFReplicaType::PS, 0))
        .await?;

    let status = registry.status("job-oob").await?;
    assert_eq!(status, admitted);
    Ok(())
}

#[tokio::test]
async fn admitting_an_empty_spec_fails_without_creating_a_job() {
    let registry = JobRegistry::default();
    let result = registry.admit_job(job_spec("job-empty", vec![])).await;

    assert!(matches!(result, Err(TFJobError::ConfigurationError(_))));
    assert_eq!(registry.job_count(), 0);
}

#[tokio::test]
async fn admitting_the_same_runtime_id_twice_fails() -> Result<()> {
    let registry = JobRegistry::default();
    registry
        .admit_job(job_spec("job-dup", vec![replica_group(TFReplicaType::Worker, 1)]))
        .await?;

    let result = registry
        .admit_job(job_spec("job-dup", vec![replica_group(TFReplicaType::Worker, 1)]))
        .await;
    assert!(matches!(result, Err(TFJobError::ValidationError(_))));
    assert_eq!(registry.job_count(), 1);
    Ok(())
}

#[tokio::test]
async fn retired_jobs_stop_accepting_updates() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec("job-ret", vec![replica_group(TFReplicaType::Worker, 1)]);
    registry.admit_job(spec).await?;

    registry.retire("job-ret")?;
    assert_eq!(registry.job_count(), 0);

    let result = registry
        .apply_observation("job-ret", ReplicaObservation::running(TFReplicaType::Worker, 0))
        .await;
    assert!(matches!(result, Err(TFJobError::JobNotFound(_))));

    let result = registry.status("job-ret").await;
    assert!(matches!(result, Err(TFJobError::JobNotFound(_))));

    assert!(matches!(
        registry.retire("job-ret"),
        Err(TFJobError::JobNotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn status_changes_are_broadcast_in_order() -> Result<()> {
    let registry = JobRegistry::default();
    let mut events = registry.subscribe();

    let spec = job_spec("job-bus", vec![replica_group(TFReplicaType::Worker, 1)]);
    registry.admit_job(spec).await?;
    registry
        .apply_observation("job-bus", ReplicaObservation::running(TFReplicaType::Worker, 0))
        .await?;
    registry
        .apply_observation(
            "job-bus",
            ReplicaObservation::succeeded(TFReplicaType::Worker, 0),
        )
        .await?;

    let admitted = events.recv().await?;
    assert_eq!(admitted.runtime_id, "job-bus");
    assert_eq!(admitted.status.phase, TFJobPhase::Pending);

    let running = events.recv().await?;
    assert_eq!(running.status.phase, TFJobPhase::Running);

    let succeeded = events.recv().await?;
    assert_eq!(succeeded.status.phase, TFJobPhase::Succeeded);

    Ok(())
}

#[tokio::test]
async fn jobs_progress_independently() -> Result<()> {
    let registry = std::sync::Arc::new(JobRegistry::default());
    registry
        .admit_job(job_spec("job-a", vec![replica_group(TFReplicaType::Worker, 1)]))
        .await?;
    registry
        .admit_job(job_spec("job-b", vec![replica_group(TFReplicaType::Worker, 1)]))
        .await?;

    let registry_a = registry.clone();
    let a = tokio::spawn(async move {
        registry_a
            .apply_observation("job-a", ReplicaObservation::succeeded(TFReplicaType::Worker, 0))
            .await
    });
    let registry_b = registry.clone();
    let b = tokio::spawn(async move {
        registry_b
            .apply_observation("job-b", ReplicaObservation::failed(TFReplicaType::Worker, 0))
            .await
    });
    a.await.unwrap()?;
    b.await.unwrap()?;

    let status_a = registry.status("job-a").await?;
    let status_b = registry.status("job-b").await?;
    assert_eq!(status_a.phase, TFJobPhase::Succeeded);
    assert_eq!(status_b.phase, TFJobPhase::Failed);

    Ok(())
}

#[tokio::test]
async fn ghost_groups_neither_block_nor_fail_a_job() -> Result<()> {
    let registry = JobRegistry::default();
    let spec = job_spec(
        "job-ghost",
        vec![
            replica_group(TFReplicaType::Worker, 1),
            replica_group(TFReplicaType::PS, 0),
        ],
    );
    let status = registry.admit_job(spec).await?;
    assert!(status.tf_replica_statuses[&TFReplicaType::PS]
        .tf_replicas_states
        .is_empty());

    registry
        .apply_observation(
            "job-ghost",
            ReplicaObservation::succeeded(TFReplicaType::Worker, 0),
        )
        .await?;
    let status = registry.status("job-ghost").await?;
    assert_eq!(status.phase, TFJobPhase::Succeeded);

    Ok(())
}
