//! Persistence adapters.
//!
//! # Responsibility
//! - Map the in-memory task collection to its stored text representation.
//! - Keep key-value and serialization details out of the task store.
//!
//! # Invariants
//! - Adapters report failures; deciding whether they are fatal is the
//!   caller's job.

pub mod task_repo;
