//! Configuration types
//!
//! Board-agnostic configuration structures, loaded by the daemon from
//! TOML.

pub mod types;

pub use types::*;
