// State machine module for the TFJob lifecycle core
//
// Owns the phase and replica-state definitions, the per-group aggregation of
// raw process observations, and the phase machine that derives the job phase
// from the aggregation under the configured termination policy.

pub mod events;
pub mod job_phase_machine;
pub mod replica_aggregator;
pub mod states;

// Re-export main types for convenient access
pub use events::ReplicaObservation;
pub use job_phase_machine::{ChiefTarget, JobPhaseMachine, PhaseDecision};
pub use replica_aggregator::{AppliedObservation, ReplicaAggregator};
pub use states::{TFJobPhase, TFReplicaState};
