//! Snapshot validation at ingestion time
//!
//! Reads raw documents only; a snapshot is never rejected for schema
//! problems, those surface later as lookup failures.

use serde_json::Value;
use shared::{Document, FilterType};
use std::collections::BTreeMap;
use std::fmt;

/// Structural problem found in an incoming snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyViolation {
    /// More than one filter of a type expected to be unique
    DuplicateSingleton { filter_type: FilterType, count: usize },
    /// More than one filter document with the same id
    DuplicateFilterId { id: String, count: usize },
}

impl fmt::Display for TopologyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyViolation::DuplicateSingleton { filter_type, count } => {
                write!(f, "{count} filters of singleton type {}", filter_type.as_str())
            }
            TopologyViolation::DuplicateFilterId { id, count } => {
                write!(f, "{count} filters share id {id}")
            }
        }
    }
}

/// Check singleton types and filter id uniqueness
pub fn check_topology(filters: &[Document]) -> Vec<TopologyViolation> {
    let mut violations = Vec::new();

    for filter_type in FilterType::SINGLETONS {
        let count = filters
            .iter()
            .filter(|filter| filter.get("type").and_then(Value::as_str) == Some(filter_type.as_str()))
            .count();
        if count > 1 {
            violations.push(TopologyViolation::DuplicateSingleton { filter_type, count });
        }
    }

    let mut ids: BTreeMap<String, usize> = BTreeMap::new();
    for id in filters.iter().filter_map(|filter| filter.get("id")) {
        *ids.entry(id.to_string()).or_default() += 1;
    }
    violations.extend(
        ids.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, count)| TopologyViolation::DuplicateFilterId { id, count }),
    );

    violations
}
