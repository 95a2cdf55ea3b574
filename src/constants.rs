//! # System Constants
//!
//! Core constants that define the operational boundaries of the TFJob
//! lifecycle core: history caps, defaults, and the reason tokens written
//! into job status on phase and condition changes.

/// Maximum number of condition entries retained in a job's status history.
/// The oldest entry is evicted once the cap is reached.
pub const MAX_RECENT_CONDITIONS: usize = 10;

/// Desired process count assumed for a replica group that does not declare one.
pub const DEFAULT_REPLICAS: i32 = 1;

/// Reason tokens recorded in `TFJobStatus.reason` and condition entries.
///
/// Tokens are CamelCase so they survive as stable, greppable identifiers in
/// persisted status objects; free-text detail is appended after the token.
pub mod reasons {
    /// The job passed admission validation and was accepted.
    pub const JOB_ADMITTED: &str = "JobAdmitted";

    /// At least one replica process left the waiting state.
    pub const REPLICAS_STARTED: &str = "ReplicasStarted";

    /// The designated chief process terminated successfully.
    pub const CHIEF_SUCCEEDED: &str = "ChiefSucceeded";

    /// Every replica process of every group terminated successfully.
    pub const ALL_REPLICAS_SUCCEEDED: &str = "AllReplicasSucceeded";

    /// A replica process failed and its failure is not tolerated.
    pub const REPLICA_FAILED: &str = "ReplicaFailed";

    /// Process state could not be observed for at least one replica group.
    pub const REPLICA_STATE_UNKNOWN: &str = "ReplicaStateUnknown";

    /// Replica state became observable again after an unknown interval.
    pub const STATUS_RESTORED: &str = "StatusRestored";

    /// The job finished but non-chief replica groups are still being torn down.
    pub const RECYCLING_RESOURCES: &str = "RecyclingResources";

    /// All replica groups of a finished job have reached a terminal state.
    pub const RECYCLE_COMPLETE: &str = "RecycleComplete";
}
