//! Versioned shape store.
//!
//! # Responsibility
//! - Expose create/copy/update/delete plus undo/redo over one registry.
//! - Keep the registry and the action log consistent after every call.
//!
//! # Invariants
//! - Every successful mutation records exactly one action and clears redo.
//! - Deleting an absent id records nothing.
//! - Failed calls leave the registry and both stacks unchanged.
//! - New ids are drawn uniformly from `[0, id_space)` and never collide
//!   with a stored key.

use crate::history::action::Action;
use crate::history::action_log::{ActionLog, HistoryError};
use crate::model::input::{ShapeInput, ShapePatch};
use crate::model::shape::{Shape, ShapeId, ShapeMap, ID_SPACE};
use crate::repo::shape_registry::{RepoError, ShapeRegistry, ShapeRepository};
use crate::service::shape_builder::{build_shape, BuildError};
use crate::snapshot::{SnapshotDir, SnapshotError, SnapshotFormat};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Operation referenced an id that is not stored.
    NotFound(ShapeId),
    /// Builder received an unrecognized type name.
    UnknownShapeType(String),
    NothingToUndo,
    NothingToRedo,
    /// Every id in `[0, id_space)` is taken.
    IdSpaceExhausted { id_space: u32 },
    /// Snapshot save/load failed; in-memory state is unchanged.
    Snapshot(SnapshotError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "shape not found: {id}"),
            Self::UnknownShapeType(value) => write!(f, "unknown shape type `{value}`"),
            Self::NothingToUndo => write!(f, "nothing to undo"),
            Self::NothingToRedo => write!(f, "nothing to redo"),
            Self::IdSpaceExhausted { id_space } => {
                write!(f, "no free shape id left in [0, {id_space})")
            }
            Self::Snapshot(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Snapshot(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl From<BuildError> for StoreError {
    fn from(value: BuildError) -> Self {
        match value {
            BuildError::UnknownShapeType(kind) => Self::UnknownShapeType(kind),
        }
    }
}

impl From<HistoryError> for StoreError {
    fn from(value: HistoryError) -> Self {
        match value {
            HistoryError::NothingToUndo => Self::NothingToUndo,
            HistoryError::NothingToRedo => Self::NothingToRedo,
        }
    }
}

impl From<SnapshotError> for StoreError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Store construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Exclusive upper bound for allocated ids.
    pub id_space: u32,
    /// Fixed seed for id allocation; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_space: ID_SPACE,
            seed: None,
        }
    }
}

/// Registry plus undo/redo history, mutated as one unit.
pub struct ShapeStore<R: ShapeRepository = ShapeRegistry> {
    registry: R,
    history: ActionLog,
    rng: StdRng,
    id_space: u32,
}

impl ShapeStore<ShapeRegistry> {
    /// Creates an empty store with default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_repository(ShapeRegistry::new(), config)
    }
}

impl Default for ShapeStore<ShapeRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ShapeRepository> ShapeStore<R> {
    /// Creates a store over an existing registry with empty history.
    pub fn with_repository(registry: R, config: StoreConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            registry,
            history: ActionLog::new(),
            rng,
            id_space: config.id_space,
        }
    }

    /// Read-only view of every stored shape.
    pub fn get_all(&self) -> &ShapeMap {
        self.registry.get_all()
    }

    pub fn get_shape(&self, id: ShapeId) -> StoreResult<&Shape> {
        Ok(self.registry.get(id)?)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Builds a shape from `input` under a fresh id and stores it.
    ///
    /// # Errors
    /// - `UnknownShapeType` when `input.kind` names no variant.
    /// - `IdSpaceExhausted` when no id is free.
    pub fn add_new_shape(&mut self, input: &ShapeInput) -> StoreResult<Shape> {
        let id = self.allocate_id()?;
        let shape = match build_shape(id, input) {
            Ok(shape) => shape,
            Err(err) => {
                warn!(
                    "event=shape_add module=store status=error error_code=unknown_shape_type error={err}"
                );
                return Err(err.into());
            }
        };

        self.registry.insert(shape.clone());
        self.history.record(Action::Added {
            id,
            shape: shape.clone(),
        });
        info!(
            "event=shape_add module=store status=ok id={id} type={}",
            shape.type_name()
        );
        Ok(shape)
    }

    /// Stores a value copy of shape `id` under a fresh id.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    /// - `IdSpaceExhausted` when no id is free.
    pub fn add_copy(&mut self, id: ShapeId) -> StoreResult<Shape> {
        let source = match self.registry.get(id) {
            Ok(shape) => shape.clone(),
            Err(err) => {
                warn!("event=shape_copy module=store status=error error_code=not_found id={id}");
                return Err(err.into());
            }
        };

        let new_id = self.allocate_id()?;
        let copy = source.duplicate(new_id);
        self.registry.insert(copy.clone());
        self.history.record(Action::Added {
            id: new_id,
            shape: copy.clone(),
        });
        info!("event=shape_copy module=store status=ok source_id={id} id={new_id}");
        Ok(copy)
    }

    /// Applies `patch` to shape `id`.
    ///
    /// # Errors
    /// - `NotFound` when `id` is absent.
    pub fn update_shape(&mut self, id: ShapeId, patch: &ShapePatch) -> StoreResult<Shape> {
        let previous = match self.registry.get(id) {
            Ok(shape) => shape.clone(),
            Err(err) => {
                warn!("event=shape_update module=store status=error error_code=not_found id={id}");
                return Err(err.into());
            }
        };

        let mut updated = previous.clone();
        updated.apply_patch(patch);
        self.registry.insert(updated.clone());
        self.history.record(Action::Updated { id, previous });
        info!("event=shape_update module=store status=ok id={id}");
        Ok(updated)
    }

    /// Removes shape `id`.
    ///
    /// Returns `false` without recording anything when `id` is absent.
    pub fn delete_shape(&mut self, id: ShapeId) -> bool {
        match self.registry.remove(id) {
            Ok(previous) => {
                self.history.record(Action::Deleted { id, previous });
                info!("event=shape_delete module=store status=ok id={id}");
                true
            }
            Err(_) => {
                info!("event=shape_delete module=store status=noop id={id}");
                false
            }
        }
    }

    /// Removes every shape. Recorded even when the registry is empty.
    pub fn delete_all(&mut self) {
        let previous = self.registry.clear();
        info!(
            "event=shape_delete_all module=store status=ok removed={}",
            previous.len()
        );
        self.history.record(Action::ClearedAll { previous });
    }

    /// Reverts the latest mutation and returns the resulting snapshot.
    ///
    /// # Errors
    /// - `NothingToUndo` when history is empty.
    pub fn undo(&mut self) -> StoreResult<ShapeMap> {
        if let Err(err) = self.history.undo(&mut self.registry) {
            warn!("event=store_undo module=store status=error error={err}");
            return Err(err.into());
        }
        info!(
            "event=store_undo module=store status=ok shapes={} undo_depth={} redo_depth={}",
            self.registry.len(),
            self.history.undo_depth(),
            self.history.redo_depth()
        );
        Ok(self.registry.get_all().clone())
    }

    /// Re-applies the latest undone action and returns the resulting snapshot.
    ///
    /// # Errors
    /// - `NothingToRedo` when nothing was undone since the last mutation.
    pub fn redo(&mut self) -> StoreResult<ShapeMap> {
        if let Err(err) = self.history.redo(&mut self.registry) {
            warn!("event=store_redo module=store status=error error={err}");
            return Err(err.into());
        }
        info!(
            "event=store_redo module=store status=ok shapes={} undo_depth={} redo_depth={}",
            self.registry.len(),
            self.history.undo_depth(),
            self.history.redo_depth()
        );
        Ok(self.registry.get_all().clone())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Swaps in a whole new collection and drops both history stacks.
    ///
    /// Entries are re-keyed by their own id. Returns the previous collection.
    pub fn replace_all(&mut self, shapes: ShapeMap) -> ShapeMap {
        let shapes: ShapeMap = shapes
            .into_values()
            .map(|shape| (shape.id(), shape))
            .collect();
        self.history.clear();
        info!(
            "event=store_replace_all module=store status=ok shapes={}",
            shapes.len()
        );
        self.registry.replace_all(shapes)
    }

    /// Writes the current collection to `dir` as `<name>.<ext>`.
    pub fn save_snapshot(
        &self,
        dir: &SnapshotDir,
        name: &str,
        format: SnapshotFormat,
    ) -> StoreResult<PathBuf> {
        Ok(dir.save(name, format, self.registry.get_all())?)
    }

    /// Replaces the collection with the snapshot `<name>.<ext>` from `dir`.
    ///
    /// The file is fully decoded before anything changes, so a failed load
    /// leaves the registry and history intact. History is cleared on success.
    pub fn load_snapshot(
        &mut self,
        dir: &SnapshotDir,
        name: &str,
        format: SnapshotFormat,
    ) -> StoreResult<ShapeMap> {
        let shapes = dir.load(name, format)?;
        self.replace_all(shapes);
        Ok(self.registry.get_all().clone())
    }

    fn allocate_id(&mut self) -> StoreResult<ShapeId> {
        let occupied = self.registry.get_all().range(..self.id_space).count();
        if occupied >= self.id_space as usize {
            warn!(
                "event=id_allocate module=store status=error error_code=id_space_exhausted id_space={}",
                self.id_space
            );
            return Err(StoreError::IdSpaceExhausted {
                id_space: self.id_space,
            });
        }

        loop {
            let candidate = self.rng.gen_range(0..self.id_space);
            if !self.registry.contains(candidate) {
                return Ok(candidate);
            }
        }
    }
}
