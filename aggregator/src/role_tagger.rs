//! Filter role tagging
//!
//! Appends classification records to `filtersRole`. The log is append-only:
//! tagging the same filter twice stores two records.

use serde_json::Value;
use shared::{component_debug, component_warn, Component, FilterRole, Id};
use std::sync::Arc;

use crate::error::AggregatorResult;
use crate::traits::GraphStore;
use crate::types::{Collection, Query};

pub struct RoleTagger<S: ?Sized> {
    store: Arc<S>,
}

impl<S: GraphStore + ?Sized> RoleTagger<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn tag_role(&self, filter_id: &Id, filter_type: &str, role: &str) -> AggregatorResult<FilterRole> {
        let record = FilterRole {
            id: filter_id.clone(),
            filter_type: filter_type.to_string(),
            role: role.to_string(),
        };

        self.store
            .insert(Collection::FiltersRole, record.to_document())
            .await?;

        component_debug!(Component::RoleTagger, "🏷️ Tagged filter {} as {}", filter_id, role);
        Ok(record)
    }

    /// Every role recorded for `filter_id`, oldest first
    pub async fn roles_for(&self, filter_id: &Id) -> AggregatorResult<Vec<FilterRole>> {
        let documents = self
            .store
            .find(Collection::FiltersRole, &Query::eq("id", filter_id.clone()))
            .await?;

        Ok(documents
            .into_iter()
            .filter_map(|document| match serde_json::from_value(Value::Object(document)) {
                Ok(role) => Some(role),
                Err(e) => {
                    component_warn!(Component::RoleTagger, "⚠️ Skipping malformed role record: {}", e);
                    None
                }
            })
            .collect())
    }
}
