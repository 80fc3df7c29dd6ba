//! Invertible mutation records.

use crate::model::shape::{Shape, ShapeId, ShapeMap};

/// One recorded mutation of the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// `shape` was inserted under a fresh `id`.
    Added { id: ShapeId, shape: Shape },
    /// The shape at `id` was changed; `previous` is the value it replaced.
    Updated { id: ShapeId, previous: Shape },
    /// The shape at `id` was removed; `previous` is what was removed.
    Deleted { id: ShapeId, previous: Shape },
    /// The whole registry was wiped; `previous` holds every removed entry.
    ClearedAll { previous: ShapeMap },
}

impl Action {
    /// Short stable name used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
            Self::ClearedAll { .. } => "cleared_all",
        }
    }

    /// Id touched by this action, or `None` for whole-registry actions.
    pub fn target_id(&self) -> Option<ShapeId> {
        match self {
            Self::Added { id, .. } | Self::Updated { id, .. } | Self::Deleted { id, .. } => {
                Some(*id)
            }
            Self::ClearedAll { .. } => None,
        }
    }
}
