//! Shared types for the mixer graph system
//!
//! Contains the typed view over the engine's filter/path documents, the
//! dashboard summary types, key canonicalization and logging helpers used by
//! every component.

pub mod errors;
pub mod keys;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
