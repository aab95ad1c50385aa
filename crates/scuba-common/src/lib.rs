//! # scuba-common
//!
//! Shared error definitions, constants, and domain primitives used across
//! the scuba workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the vocabulary the resolution core and the
//! CLI share.

pub mod constants;
pub mod error;
pub mod types;
