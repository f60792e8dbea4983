use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Document, Id};
use crate::errors::{SharedError, SharedResult};

/// One signal chain: origin filter, the stages after it, and the reader it ends at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub origin_filter: Id,
    #[serde(default)]
    pub filters: Vec<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_reader: Option<Id>,
    #[serde(flatten)]
    pub extra: Document,
}

impl Path {
    pub fn new(origin_filter: impl Into<Id>, filters: Vec<Id>, destination_reader: Option<Id>) -> Self {
        Self {
            origin_filter: origin_filter.into(),
            filters,
            destination_reader,
            extra: Document::new(),
        }
    }

    /// The stage immediately after the origin (the encoder for a mixer path)
    pub fn next_stage(&self) -> Option<&Id> {
        self.filters.first()
    }

    pub fn to_document(&self) -> Document {
        let mut document = self.extra.clone();
        document.insert("originFilter".to_string(), self.origin_filter.to_value());
        document.insert(
            "filters".to_string(),
            Value::Array(self.filters.iter().map(Id::to_value).collect()),
        );
        if let Some(reader) = &self.destination_reader {
            document.insert("destinationReader".to_string(), reader.to_value());
        }
        document
    }
}

impl TryFrom<Document> for Path {
    type Error = SharedError;

    fn try_from(document: Document) -> SharedResult<Self> {
        serde_json::from_value(Value::Object(document)).map_err(|e| SharedError::invalid("path", e))
    }
}
