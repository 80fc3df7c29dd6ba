//! Versioned shape store with undo/redo.
//!
//! The registry holds the live shapes, the action log records every mutation
//! as an invertible action, and `ShapeStore` keeps both in step.

pub mod history;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod snapshot;

pub use history::action::Action;
pub use history::action_log::{ActionLog, HistoryError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::input::{ShapeInput, ShapePatch};
pub use model::shape::{Shape, ShapeId, ShapeKind, ShapeMap, ID_SPACE};
pub use repo::shape_registry::{RepoError, RepoResult, ShapeRegistry, ShapeRepository};
pub use service::shape_builder::{build_shape, BuildError};
pub use service::shape_store::{ShapeStore, StoreConfig, StoreError, StoreResult};
pub use service::shared_store::SharedShapeStore;
pub use snapshot::{SnapshotDir, SnapshotError, SnapshotFormat, SnapshotResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
