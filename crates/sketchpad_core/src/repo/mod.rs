//! Registry layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the keyed-collection contract the store mutates.
//! - Keep map details out of history and service orchestration.
//!
//! # Invariants
//! - Registry APIs never record history; they are pure data access.
//! - Lookups of absent ids return semantic `NotFound` errors.

pub mod shape_registry;
