//! Shape registry contract and in-memory implementation.
//!
//! # Responsibility
//! - Own the live `id -> Shape` mapping.
//! - Offer wholesale read/replace for the snapshot adapter.
//!
//! # Invariants
//! - Every key equals the `id` of its value; `insert` derives the key from
//!   the shape itself.

use crate::model::shape::{Shape, ShapeId, ShapeMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Registry lookup error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoError {
    NotFound(ShapeId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "shape not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// Keyed shape collection used by the versioned store.
pub trait ShapeRepository {
    /// Read-only view of every stored shape.
    fn get_all(&self) -> &ShapeMap;
    fn get(&self, id: ShapeId) -> RepoResult<&Shape>;
    fn contains(&self, id: ShapeId) -> bool;
    /// Inserts `shape` under its own id, returning the replaced value.
    fn insert(&mut self, shape: Shape) -> Option<Shape>;
    fn remove(&mut self, id: ShapeId) -> RepoResult<Shape>;
    /// Removes every shape and returns what was removed.
    fn clear(&mut self) -> ShapeMap;
    /// Swaps the whole collection, returning the previous one.
    fn replace_all(&mut self, shapes: ShapeMap) -> ShapeMap;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory registry backed by an ordered map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeRegistry {
    shapes: ShapeMap,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShapeRepository for ShapeRegistry {
    fn get_all(&self) -> &ShapeMap {
        &self.shapes
    }

    fn get(&self, id: ShapeId) -> RepoResult<&Shape> {
        self.shapes.get(&id).ok_or(RepoError::NotFound(id))
    }

    fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    fn insert(&mut self, shape: Shape) -> Option<Shape> {
        self.shapes.insert(shape.id(), shape)
    }

    fn remove(&mut self, id: ShapeId) -> RepoResult<Shape> {
        self.shapes.remove(&id).ok_or(RepoError::NotFound(id))
    }

    fn clear(&mut self) -> ShapeMap {
        std::mem::take(&mut self.shapes)
    }

    fn replace_all(&mut self, shapes: ShapeMap) -> ShapeMap {
        std::mem::replace(&mut self.shapes, shapes)
    }

    fn len(&self) -> usize {
        self.shapes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{RepoError, ShapeRegistry, ShapeRepository};
    use crate::model::shape::{Shape, ShapeKind};

    fn circle(id: u32, radius: f32) -> Shape {
        Shape::new(id, ShapeKind::Circle { radius })
    }

    #[test]
    fn insert_overwrites_existing_entry() {
        let mut registry = ShapeRegistry::new();
        assert!(registry.insert(circle(1, 2.0)).is_none());

        let replaced = registry.insert(circle(1, 3.0)).unwrap();
        assert_eq!(replaced.kind, ShapeKind::Circle { radius: 2.0 });
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(1).unwrap().kind,
            ShapeKind::Circle { radius: 3.0 }
        );
    }

    #[test]
    fn remove_absent_id_is_not_found() {
        let mut registry = ShapeRegistry::new();
        assert_eq!(registry.remove(5).unwrap_err(), RepoError::NotFound(5));
        assert_eq!(registry.get(5).unwrap_err(), RepoError::NotFound(5));
    }

    #[test]
    fn clear_returns_removed_entries() {
        let mut registry = ShapeRegistry::new();
        registry.insert(circle(1, 1.0));
        registry.insert(circle(2, 2.0));

        let removed = registry.clear();
        assert_eq!(removed.len(), 2);
        assert!(registry.is_empty());
        assert!(removed.contains_key(&2));
    }
}
