//! Shape domain model.
//!
//! # Responsibility
//! - Define the closed set of shape variants handled by the store.
//! - Define the payloads used to build and patch shapes.
//!
//! # Invariants
//! - A shape's `id` never changes after construction.
//! - Every `ShapeMap` key equals the `id` of its value.

pub mod input;
pub mod shape;
