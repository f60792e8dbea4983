//! Key canonicalization for nested documents
//!
//! The engine's topology export may carry symbolic tokens as keys (`:volume`)
//! next to plain string keys. Stored documents use string keys only, so the
//! symbol sigil is dropped, recursively, at the ingestion boundary. Nothing
//! else about a key changes: case, underscores and whitespace are kept as
//! received.

use serde_json::{Map, Value};

use crate::types::Document;

const SYMBOL_SIGIL: char = ':';

/// String form of a single key: the key without its leading symbol sigil.
pub fn canonical_key(key: &str) -> &str {
    key.strip_prefix(SYMBOL_SIGIL).unwrap_or(key)
}

/// Recursively stringify every object key in `value`.
/// Non-object values are returned untouched; arrays are walked.
pub fn canonicalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(canonicalize_document(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_keys).collect()),
        other => other,
    }
}

/// Stringify the keys of a whole document.
///
/// A symbol key whose string form is already taken by another key keeps its
/// sigil, so no value is ever dropped.
pub fn canonicalize_document(document: Document) -> Document {
    let mut out = Map::with_capacity(document.len());
    let mut symbols = Vec::new();

    for (key, value) in document {
        if canonical_key(&key).len() == key.len() {
            out.insert(key, canonicalize_keys(value));
        } else {
            symbols.push((key, value));
        }
    }

    // Shortest first, so a key kept with its sigil can never be taken by a
    // later rename.
    symbols.sort_by_key(|(key, _)| key.len());
    for (key, value) in symbols {
        let bare = canonical_key(&key).to_string();
        let key = if out.contains_key(&bare) { key } else { bare };
        out.insert(key, canonicalize_keys(value));
    }
    out
}
