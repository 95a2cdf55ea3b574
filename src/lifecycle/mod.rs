// Lifecycle module: one owning actor per job, fronted by a shared registry
//
// Re-architects the shared-mutable-status model of the source schema as
// message passing. Each admitted job gets its own tokio task consuming a
// serialized command queue; the registry routes operations by runtime ID.

mod job_actor;
pub mod registry;

pub use registry::JobRegistry;
