//! Document indexer: chunk, embed, upsert.

use std::sync::Arc;

use tracing::{info, warn};

use docmatch_chunking::chunk_document;
use docmatch_core::category::Category;
use docmatch_core::chunk::Metadata;
use docmatch_core::document::DocumentContent;
use docmatch_core::errors::DocMatchResult;
use docmatch_embeddings::EmbeddingEngine;

use crate::metadata;
use crate::store::{IndexEntry, VectorIndex};

/// Indexes one document at a time: chunks the structured content, embeds
/// all chunk texts in a single batch, and atomically replaces the
/// document's entries in its category collection.
pub struct DocumentIndexer {
    index: Arc<VectorIndex>,
    embeddings: Arc<EmbeddingEngine>,
}

impl DocumentIndexer {
    pub fn new(index: Arc<VectorIndex>, embeddings: Arc<EmbeddingEngine>) -> Self {
        Self { index, embeddings }
    }

    /// Index a document and return the number of chunks written.
    ///
    /// Empty content skips chunking and embedding and clears any
    /// previously indexed entries, so deleting content deletes the index
    /// rows too.
    pub fn index_document(
        &self,
        category: Category,
        document_id: i64,
        content: &DocumentContent,
        doc_metadata: &Metadata,
    ) -> DocMatchResult<usize> {
        if content.is_empty() {
            self.index.upsert_document(category, document_id, &[])?;
            info!(
                category = category.as_str(),
                document_id, "content empty, cleared indexed entries"
            );
            return Ok(0);
        }

        let chunks = chunk_document(document_id, category, content, doc_metadata);

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embeddings.embed_batch(&texts)?;

        let entries: Vec<IndexEntry> = chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, embedding)| IndexEntry {
                entry_id: chunk.entry_id(),
                document_id,
                text: chunk.text.clone(),
                embedding,
                metadata: metadata::for_chunk(chunk),
            })
            .collect();

        let count = self.index.upsert_document(category, document_id, &entries)?;
        info!(
            category = category.as_str(),
            document_id, chunks = count, "document indexed"
        );
        Ok(count)
    }

    /// Fire-and-forget variant for write paths where indexing is a side
    /// effect of saving a document: failures are logged, never surfaced.
    pub fn index_logged(
        &self,
        category: Category,
        document_id: i64,
        content: &DocumentContent,
        doc_metadata: &Metadata,
    ) -> bool {
        match self.index_document(category, document_id, content, doc_metadata) {
            Ok(_) => true,
            Err(e) => {
                warn!(
                    category = category.as_str(),
                    document_id,
                    error = %e,
                    "background indexing failed"
                );
                false
            }
        }
    }

    /// Remove a document from its category collection.
    pub fn remove_document(&self, category: Category, document_id: i64) -> DocMatchResult<usize> {
        self.index.delete_document(category, document_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmatch_core::config::EmbeddingConfig;
    use test_fixtures::{sample_spec, spec_metadata};

    fn indexer() -> (Arc<VectorIndex>, DocumentIndexer) {
        let index = Arc::new(VectorIndex::open_in_memory().unwrap());
        let embeddings = Arc::new(EmbeddingEngine::new(EmbeddingConfig {
            provider: "tfidf".to_string(),
            dimensions: 128,
            ..Default::default()
        }));
        (index.clone(), DocumentIndexer::new(index, embeddings))
    }

    #[test]
    fn indexing_writes_one_entry_per_chunk() {
        let (index, indexer) = indexer();
        let count = indexer
            .index_document(Category::Spec, 1, &sample_spec(), &spec_metadata())
            .unwrap();
        assert!(count > 0);
        assert_eq!(index.stats().unwrap().spec_entries, count as u64);
    }

    #[test]
    fn reindexing_is_idempotent_on_entry_ids() {
        let (index, indexer) = indexer();
        let content = sample_spec();
        let meta = spec_metadata();
        indexer
            .index_document(Category::Spec, 1, &content, &meta)
            .unwrap();
        let first = index.entry_ids(Category::Spec, 1).unwrap();
        indexer
            .index_document(Category::Spec, 1, &content, &meta)
            .unwrap();
        let second = index.entry_ids(Category::Spec, 1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_content_clears_previous_entries() {
        let (index, indexer) = indexer();
        indexer
            .index_document(Category::Spec, 1, &sample_spec(), &spec_metadata())
            .unwrap();
        assert!(index.stats().unwrap().spec_entries > 0);

        let empty = DocumentContent::Sections {
            sections: Vec::new(),
        };
        let count = indexer
            .index_document(Category::Spec, 1, &empty, &Metadata::new())
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(index.stats().unwrap().spec_entries, 0);
    }
}
