//! Undo/redo stacks and their replay rules.
//!
//! # Responsibility
//! - Keep the undo stack (latest mutation on top) and the redo stack
//!   (latest undone action on top).
//! - Apply each action's inverse or forward effect to a registry.
//!
//! # Invariants
//! - `record` clears the redo stack.
//! - Undo of `Updated` pushes a record carrying the value that was current
//!   before the undo ran, so redo restores exactly that value. Redo mirrors
//!   this when pushing back onto the undo stack.
//! - A failed undo/redo (empty stack) leaves the registry untouched.

use crate::history::action::Action;
use crate::model::shape::Shape;
use crate::repo::shape_registry::ShapeRepository;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from stepping through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    NothingToUndo,
    NothingToRedo,
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingToUndo => write!(f, "nothing to undo"),
            Self::NothingToRedo => write!(f, "nothing to redo"),
        }
    }
}

impl Error for HistoryError {}

/// Two-stack action history.
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fresh mutation and invalidates redo history.
    pub fn record(&mut self, action: Action) {
        debug!(
            "event=history_record module=history action={} id={} redo_dropped={}",
            action.label(),
            action
                .target_id()
                .map_or_else(|| "all".to_string(), |id| id.to_string()),
            self.redo_stack.len()
        );
        self.undo_stack.push(action);
        self.redo_stack.clear();
    }

    /// Reverts the most recent mutation.
    ///
    /// # Errors
    /// - `NothingToUndo` when no mutation is recorded.
    pub fn undo<R>(&mut self, registry: &mut R) -> Result<(), HistoryError>
    where
        R: ShapeRepository + ?Sized,
    {
        let action = self.undo_stack.pop().ok_or(HistoryError::NothingToUndo)?;
        debug!(
            "event=history_undo module=history action={} undo_depth={}",
            action.label(),
            self.undo_stack.len()
        );

        let redo_record = match action {
            Action::Added { id, shape } => {
                if registry.remove(id).is_err() {
                    warn!("event=history_undo module=history status=skipped reason=added_id_missing id={id}");
                }
                Action::Added { id, shape }
            }
            Action::Updated { id, previous } => {
                let current = swap_in(registry, previous);
                Action::Updated {
                    id,
                    previous: current,
                }
            }
            Action::Deleted { id, previous } => {
                registry.insert(previous.clone());
                Action::Deleted { id, previous }
            }
            Action::ClearedAll { previous } => {
                for shape in previous.values() {
                    registry.insert(shape.clone());
                }
                Action::ClearedAll { previous }
            }
        };

        self.redo_stack.push(redo_record);
        Ok(())
    }

    /// Re-applies the most recently undone action.
    ///
    /// # Errors
    /// - `NothingToRedo` when nothing was undone since the last mutation.
    pub fn redo<R>(&mut self, registry: &mut R) -> Result<(), HistoryError>
    where
        R: ShapeRepository + ?Sized,
    {
        let action = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        debug!(
            "event=history_redo module=history action={} redo_depth={}",
            action.label(),
            self.redo_stack.len()
        );

        let undo_record = match action {
            Action::Added { id, shape } => {
                registry.insert(shape.clone());
                Action::Added { id, shape }
            }
            Action::Updated { id, previous } => {
                let current = swap_in(registry, previous);
                Action::Updated {
                    id,
                    previous: current,
                }
            }
            Action::Deleted { id, previous } => match registry.remove(id) {
                Ok(removed) => Action::Deleted {
                    id,
                    previous: removed,
                },
                Err(_) => {
                    warn!("event=history_redo module=history status=skipped reason=deleted_id_missing id={id}");
                    Action::Deleted { id, previous }
                }
            },
            Action::ClearedAll { .. } => Action::ClearedAll {
                previous: registry.clear(),
            },
        };

        self.undo_stack.push(undo_record);
        Ok(())
    }

    /// Drops both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

/// Writes `shape` into the registry and returns the value it displaced.
///
/// When nothing was displaced the written value itself is returned, which
/// turns the matching replay into a plain re-insert.
fn swap_in<R>(registry: &mut R, shape: Shape) -> Shape
where
    R: ShapeRepository + ?Sized,
{
    let id = shape.id();
    let written = shape.clone();
    match registry.insert(shape) {
        Some(current) => current,
        None => {
            warn!("event=history_swap module=history status=skipped reason=updated_id_missing id={id}");
            written
        }
    }
}
