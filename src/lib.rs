#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # TFJob Core
//!
//! Lifecycle and status-aggregation core for distributed TensorFlow training
//! jobs managed by a cluster orchestrator.
//!
//! ## Overview
//!
//! A TFJob is one training run composed of role-typed replica groups
//! (parameter servers, workers, or a local single process). A distributed job
//! has no single exit code, so "done" is derived from the states of its
//! processes: either a designated chief process governs completion, or every
//! group must terminate successfully. This crate owns that derivation — the
//! job phase state machine, the per-group aggregation of raw process states,
//! and the bounded condition history — and leaves scheduling, persistence,
//! and the reconcile loop to the embedding platform.
//!
//! ## Architecture
//!
//! Status mutation is single-writer per job: each admitted job is owned by
//! one tokio task consuming a serialized command queue, so phase transitions
//! and condition-history updates keep a total order without locking. Jobs are
//! independent and processed fully in parallel. Status changes are pushed to
//! the embedding platform over a broadcast channel.
//!
//! ## Module Organization
//!
//! - [`models`] - Schema types for jobs, replica groups, status, and conditions
//! - [`state_machine`] - Phase and replica-state machines plus aggregation
//! - [`lifecycle`] - Per-job actors and the cross-job registry
//! - [`events`] - Status-changed broadcast publisher
//! - [`validation`] - Admission validation of job specs
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tfjob_core::lifecycle::JobRegistry;
//! use tfjob_core::models::{TFJobSpec, TFReplicaSpec, TFReplicaType};
//! use tfjob_core::state_machine::ReplicaObservation;
//!
//! # async fn example() -> tfjob_core::Result<()> {
//! let registry = JobRegistry::default();
//!
//! let spec = TFJobSpec {
//!     runtime_id: "mnist-1".to_string(),
//!     specs: vec![TFReplicaSpec {
//!         replicas: Some(1),
//!         tf_replica_type: Some(TFReplicaType::Worker),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let status = registry.admit_job(spec).await?;
//! println!("admitted in phase {}", status.phase);
//!
//! registry
//!     .apply_observation("mnist-1", ReplicaObservation::running(TFReplicaType::Worker, 0))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod state_machine;
pub mod validation;

pub use config::CoreConfig;
pub use error::{Result, TFJobError};
pub use events::{StatusChanged, StatusPublisher};
pub use lifecycle::JobRegistry;
pub use models::{
    ChiefSpec, ConditionStatus, TFJob, TFJobCondition, TFJobConditionType, TFJobSpec, TFJobStatus,
    TFReplicaSpec, TFReplicaStatus, TFReplicaType, TerminationPolicySpec,
};
pub use state_machine::{
    ChiefTarget, JobPhaseMachine, ReplicaAggregator, ReplicaObservation, TFJobPhase,
    TFReplicaState,
};
