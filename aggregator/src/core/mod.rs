//! Core business logic modules
//!
//! Pure functions over typed graph nodes with no I/O dependencies

pub mod summary;
pub mod validation;

// Re-export commonly used types
pub use summary::{build_channels, free_channels, match_session, summarize};
pub use validation::{check_topology, TopologyViolation};
