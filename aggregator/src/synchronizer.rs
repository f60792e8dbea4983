//! Topology synchronization
//!
//! The only write path for `filters` and `paths`: every sync replaces both
//! collections with the engine's latest full snapshot. There is no diffing.

use shared::keys::canonicalize_document;
use shared::{component_error, component_info, component_warn, Component, Document, TopologySnapshot};
use std::sync::Arc;

use crate::config::IngestionPolicy;
use crate::core::{check_topology, TopologyViolation};
use crate::error::{AggregatorError, AggregatorResult};
use crate::traits::GraphStore;

/// Outcome of one applied snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub filters: usize,
    pub paths: usize,
    /// Problems found and tolerated under the lenient policy
    pub violations: Vec<TopologyViolation>,
}

/// Replaces the stored topology with engine snapshots
pub struct GraphSynchronizer<S: ?Sized> {
    store: Arc<S>,
    policy: IngestionPolicy,
}

impl<S: GraphStore + ?Sized> GraphSynchronizer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            policy: IngestionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: IngestionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace `filters` and `paths` with the given snapshot.
    ///
    /// Symbol-style keys are stringified before anything is validated or
    /// written; every other key is stored as received.
    pub async fn apply_snapshot(&self, filters: Vec<Document>, paths: Vec<Document>) -> AggregatorResult<SyncReport> {
        let filters: Vec<Document> = filters.into_iter().map(canonicalize_document).collect();
        let paths: Vec<Document> = paths.into_iter().map(canonicalize_document).collect();

        let violations = check_topology(&filters);
        for violation in &violations {
            component_warn!(Component::Synchronizer, "⚠️ Snapshot violation: {}", violation);
        }

        if self.policy == IngestionPolicy::Strict {
            if let Some(TopologyViolation::DuplicateSingleton { filter_type, count }) = violations
                .iter()
                .find(|v| matches!(v, TopologyViolation::DuplicateSingleton { .. }))
            {
                component_error!(
                    Component::Synchronizer,
                    "❌ Rejected snapshot: {} filters of singleton type {}",
                    count,
                    filter_type.as_str()
                );
                return Err(AggregatorError::DuplicateSingleton {
                    filter_type: filter_type.as_str().to_string(),
                    count: *count,
                });
            }
        }

        let report = SyncReport {
            filters: filters.len(),
            paths: paths.len(),
            violations,
        };
        self.store.replace_topology(filters, paths).await?;

        component_info!(
            Component::Synchronizer,
            "🔄 Applied snapshot: {} filters, {} paths",
            report.filters,
            report.paths
        );
        Ok(report)
    }

    /// Apply the engine's combined `{filters, paths}` export
    pub async fn apply_snapshot_document(&self, snapshot: TopologySnapshot) -> AggregatorResult<SyncReport> {
        self.apply_snapshot(snapshot.filters, snapshot.paths).await
    }
}
