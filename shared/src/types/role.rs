use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Document, Id};

/// Classification record appended to `filtersRole`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRole {
    pub id: Id,
    #[serde(rename = "type")]
    pub filter_type: String,
    pub role: String,
}

impl FilterRole {
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert("id".to_string(), self.id.to_value());
        document.insert("type".to_string(), Value::String(self.filter_type.clone()));
        document.insert("role".to_string(), Value::String(self.role.clone()));
        document
    }
}
