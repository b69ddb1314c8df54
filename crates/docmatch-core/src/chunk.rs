//! Chunk: the bounded unit of document text produced for indexing.

use serde::{Deserialize, Serialize};

/// Free-form metadata attached to documents and chunks.
///
/// Values may be scalars or lists/maps; the index flattens non-scalar
/// values to JSON strings at storage time.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A bounded, semantically coherent piece of a document.
///
/// `(document_id, chunk_index)` is unique within a category. Chunks are
/// never mutated; re-indexing replaces a document's chunk set wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub document_id: i64,
    pub chunk_index: usize,
    /// Category-specific tag: "screen", "backend_operation", "endpoint",
    /// "data_entity", "test_case", or a section type for generic content.
    pub chunk_type: String,
    pub text: String,
    pub metadata: Metadata,
}

impl Chunk {
    /// Entry identifier used by the index: `doc{document_id}_chunk{chunk_index}`.
    pub fn entry_id(&self) -> String {
        format!("doc{}_chunk{}", self.document_id, self.chunk_index)
    }

    /// Estimated token count (1 token per 4 characters).
    pub fn estimated_tokens(&self) -> usize {
        self.text.len() / crate::constants::CHARS_PER_TOKEN
    }
}
