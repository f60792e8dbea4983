//! Store-facing types: collection names and document queries

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::Document;
use std::fmt;

/// Collections held by the graph store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    Filters,
    Paths,
    FiltersRole,
    OutputSessions,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Filters,
        Collection::Paths,
        Collection::FiltersRole,
        Collection::OutputSessions,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Filters => "filters",
            Collection::Paths => "paths",
            Collection::FiltersRole => "filtersRole",
            Collection::OutputSessions => "outputSessions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conjunction of top-level field equality predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    conditions: Vec<(String, Value)>,
}

impl Query {
    /// Matches every document
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return f.write_str("{}");
        }
        let parts: Vec<String> = self
            .conditions
            .iter()
            .map(|(field, value)| format!("{field}={value}"))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Selects one of a filter's output writers when resolving its output path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WriterSelector(pub u32);

impl WriterSelector {
    /// The filter's first output writer; the only one resolved today
    pub const PRIMARY: WriterSelector = WriterSelector(0);

    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }
}

impl fmt::Display for WriterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "writer {}", self.0)
    }
}
