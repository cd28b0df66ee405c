//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the canonical task value shared by every list projection.
//!
//! # Invariants
//! - Tasks are values; state changes produce new tasks.

pub mod task;
