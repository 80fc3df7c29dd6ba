//! Undo/redo history for registry mutations.
//!
//! # Responsibility
//! - Record every store mutation as an invertible `Action`.
//! - Replay inverses on undo and originals on redo against a registry.
//!
//! # Invariants
//! - Recording a fresh action empties the redo stack.
//! - History lives only in memory; snapshots never include it.

pub mod action;
pub mod action_log;
