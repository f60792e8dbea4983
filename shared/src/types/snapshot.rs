use serde::{Deserialize, Serialize};

use super::Document;

/// Full topology export produced by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    #[serde(default)]
    pub filters: Vec<Document>,
    #[serde(default)]
    pub paths: Vec<Document>,
}
