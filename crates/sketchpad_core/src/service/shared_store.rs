//! Thread-safe handle over one `ShapeStore`.
//!
//! # Responsibility
//! - Serialize every store call behind one mutex so the registry and both
//!   history stacks change together.
//!
//! # Invariants
//! - Each method holds the lock for its whole duration, including id
//!   allocation plus insert, and snapshot decode plus swap.
//! - A poisoned lock is recovered: store methods only mutate after every
//!   fallible step has succeeded.

use crate::model::input::{ShapeInput, ShapePatch};
use crate::model::shape::{Shape, ShapeId, ShapeMap};
use crate::service::shape_store::{ShapeStore, StoreConfig, StoreResult};
use crate::snapshot::{SnapshotDir, SnapshotFormat};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, lock-guarded store handle.
#[derive(Clone, Default)]
pub struct SharedShapeStore {
    inner: Arc<Mutex<ShapeStore>>,
}

impl SharedShapeStore {
    pub fn new(store: ShapeStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self::new(ShapeStore::with_config(config))
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_store<T>(&self, f: impl FnOnce(&mut ShapeStore) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn get_all(&self) -> ShapeMap {
        self.lock().get_all().clone()
    }

    pub fn get_shape(&self, id: ShapeId) -> StoreResult<Shape> {
        self.lock().get_shape(id).cloned()
    }

    pub fn add_new_shape(&self, input: &ShapeInput) -> StoreResult<Shape> {
        self.lock().add_new_shape(input)
    }

    pub fn add_copy(&self, id: ShapeId) -> StoreResult<Shape> {
        self.lock().add_copy(id)
    }

    pub fn update_shape(&self, id: ShapeId, patch: &ShapePatch) -> StoreResult<Shape> {
        self.lock().update_shape(id, patch)
    }

    pub fn delete_shape(&self, id: ShapeId) -> bool {
        self.lock().delete_shape(id)
    }

    pub fn delete_all(&self) {
        self.lock().delete_all();
    }

    pub fn undo(&self) -> StoreResult<ShapeMap> {
        self.lock().undo()
    }

    pub fn redo(&self) -> StoreResult<ShapeMap> {
        self.lock().redo()
    }

    pub fn save_snapshot(
        &self,
        dir: &SnapshotDir,
        name: &str,
        format: SnapshotFormat,
    ) -> StoreResult<PathBuf> {
        self.lock().save_snapshot(dir, name, format)
    }

    pub fn load_snapshot(
        &self,
        dir: &SnapshotDir,
        name: &str,
        format: SnapshotFormat,
    ) -> StoreResult<ShapeMap> {
        self.lock().load_snapshot(dir, name, format)
    }

    fn lock(&self) -> MutexGuard<'_, ShapeStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
