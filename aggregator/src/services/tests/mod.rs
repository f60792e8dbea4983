//! Service-specific tests
//!
//! Both graph store implementations are exercised through the `GraphStore`
//! trait so they are held to the same contract.


// Common test utilities for services
#[cfg(test)]
pub mod common {
    use serde_json::{json, Value};
    use shared::Document;

    pub fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    pub fn filter(id: &str, filter_type: &str) -> Document {
        doc(json!({"id": id, "type": filter_type}))
    }

    pub fn path(origin: &str, stages: &[&str]) -> Document {
        doc(json!({"originFilter": origin, "filters": stages}))
    }
}
