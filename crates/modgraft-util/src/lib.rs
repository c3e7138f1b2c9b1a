//! Shared utilities for modgraft.
//!
//! This crate provides cross-cutting concerns used by the other modgraft
//! crates: the unified error type, filesystem helpers, and styled status
//! lines for the diagnostic stream.

pub mod errors;
pub mod fs;
pub mod status;
