//! Flutter bridge surface for the to-do core.

pub mod api;
