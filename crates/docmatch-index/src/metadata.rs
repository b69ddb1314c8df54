//! Metadata flattening for index rows.
//!
//! Chunk metadata arrives as arbitrary JSON; the index stores a flat
//! string-to-string map so equality filters stay trivial. Nested values
//! are serialized in place rather than dropped.

use chrono::Utc;
use serde_json::Value;

use docmatch_core::chunk::{Chunk, Metadata};

/// Flat metadata as stored on each index row.
pub type FlatMetadata = std::collections::BTreeMap<String, String>;

/// Flatten JSON metadata into string values.
///
/// Scalars stringify directly, null becomes the empty string, and arrays
/// or objects are kept as their JSON text.
pub fn flatten(metadata: &Metadata) -> FlatMetadata {
    let mut flat = FlatMetadata::new();
    for (key, value) in metadata {
        flat.insert(key.clone(), flatten_value(value));
    }
    flat
}

fn flatten_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Flatten a chunk's metadata and stamp the standard index fields.
pub fn for_chunk(chunk: &Chunk) -> FlatMetadata {
    let mut flat = flatten(&chunk.metadata);
    flat.insert("document_id".to_string(), chunk.document_id.to_string());
    flat.insert("chunk_index".to_string(), chunk.chunk_index.to_string());
    flat.insert("chunk_type".to_string(), chunk.chunk_type.clone());
    flat.insert("indexed_at".to_string(), Utc::now().to_rfc3339());
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: Value) -> Metadata {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test metadata must be an object"),
        }
    }

    #[test]
    fn scalars_flatten_to_plain_strings() {
        let flat = flatten(&meta(json!({
            "title": "Login Spec",
            "version": 3,
            "active": true,
            "missing": null,
        })));
        assert_eq!(flat["title"], "Login Spec");
        assert_eq!(flat["version"], "3");
        assert_eq!(flat["active"], "true");
        assert_eq!(flat["missing"], "");
    }

    #[test]
    fn nested_values_keep_their_json_text() {
        let flat = flatten(&meta(json!({"tags": ["auth", "ui"]})));
        assert_eq!(flat["tags"], r#"["auth","ui"]"#);
    }

    #[test]
    fn chunk_fields_are_stamped() {
        let chunk = Chunk {
            document_id: 7,
            chunk_index: 2,
            chunk_type: "screen".to_string(),
            text: "Screen: Login".to_string(),
            metadata: meta(json!({"title": "Login Spec"})),
        };
        let flat = for_chunk(&chunk);
        assert_eq!(flat["document_id"], "7");
        assert_eq!(flat["chunk_index"], "2");
        assert_eq!(flat["chunk_type"], "screen");
        assert_eq!(flat["title"], "Login Spec");
        assert!(flat.contains_key("indexed_at"));
    }
}
