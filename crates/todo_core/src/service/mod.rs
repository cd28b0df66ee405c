//! Core use-case services.
//!
//! # Responsibility
//! - Hold session state and orchestrate persistence for UI callers.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_store;
