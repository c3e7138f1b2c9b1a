//! Core data types for modgraft.
//!
//! This crate defines the structured form of a Go module manifest
//! (`go.mod`): module coordinates, versions, the require / replace / exclude
//! sections and their mutation operations, the textual parser and canonical
//! formatter, and the tool's configuration file.
//!
//! This crate performs no merging itself; see `modgraft-merge`.

pub mod config;
pub mod coordinate;
pub mod manifest;
pub mod modfile;
pub mod version;
