//! Core use-case services.
//!
//! # Responsibility
//! - Compose registry and history into the versioned store.
//! - Build shapes from client payloads.
//! - Provide a lock-guarded handle for multi-threaded callers.

pub mod shape_builder;
pub mod shape_store;
pub mod shared_store;
