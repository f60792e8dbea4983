//! Service implementations
//!
//! Real implementations of the graph store trait.

pub mod file_store;
pub mod memory_store;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use file_store::FileGraphStore;
pub use memory_store::RealGraphStore;
