//! Aggregator-specific error types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::Collection;

/// Graph entities a mandatory lookup can fail to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Mixer,
    Transmitter,
    Path,
    Encoder,
    Receiver,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Mixer => "mixer",
            EntityKind::Transmitter => "transmitter",
            EntityKind::Path => "path",
            EntityKind::Encoder => "encoder",
            EntityKind::Receiver => "receiver",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum AggregatorError {
    #[error("Required {entity} not found in the filter graph")]
    NotFound { entity: EntityKind },

    #[error("Graph store unavailable during {operation} on {collection}: {message}")]
    StoreUnavailable {
        operation: &'static str,
        collection: String,
        message: String,
    },

    #[error("Not implemented: {feature}")]
    NotImplemented { feature: String },

    #[error("Snapshot rejected: {count} filters of singleton type {filter_type}")]
    DuplicateSingleton { filter_type: String, count: usize },

    #[error("Configuration error: {field}")]
    Configuration { field: String },
}

impl AggregatorError {
    pub fn not_found(entity: EntityKind) -> Self {
        AggregatorError::NotFound { entity }
    }

    /// Store-level failure on one collection
    pub fn store(operation: &'static str, collection: Collection, error: impl fmt::Display) -> Self {
        AggregatorError::StoreUnavailable {
            operation,
            collection: collection.to_string(),
            message: error.to_string(),
        }
    }

    /// Store-level failure that is not tied to a single collection
    pub fn store_wide(operation: &'static str, error: impl fmt::Display) -> Self {
        AggregatorError::StoreUnavailable {
            operation,
            collection: "*".to_string(),
            message: error.to_string(),
        }
    }

    pub fn config(field: impl Into<String>) -> Self {
        AggregatorError::Configuration { field: field.into() }
    }

    /// The missing entity, for `NotFound` errors
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            AggregatorError::NotFound { entity } => Some(*entity),
            _ => None,
        }
    }

    pub fn is_not_found(&self, kind: EntityKind) -> bool {
        self.entity() == Some(kind)
    }

    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, AggregatorError::StoreUnavailable { .. })
    }
}

pub type AggregatorResult<T> = Result<T, AggregatorError>;
