//! Bulk re-indexing with checkpoint-based resume.
//!
//! Walks a `DocumentSource` category by category in id order, indexing
//! each document and persisting a JSON checkpoint after every batch. A
//! crashed run resumes after the last checkpointed document instead of
//! starting over. Single-document failures are logged and counted, never
//! fatal to the run.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use docmatch_core::category::Category;
use docmatch_core::config::IndexConfig;
use docmatch_core::errors::{DocMatchResult, IndexError};
use docmatch_core::traits::DocumentSource;

use docmatch_chunking::chunk_document;

use crate::indexer::DocumentIndexer;

/// Counters for one reindex run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReindexStats {
    pub documents_indexed: u64,
    pub chunks_indexed: u64,
    pub failures: u64,
}

impl ReindexStats {
    fn merge(&mut self, other: &ReindexStats) {
        self.documents_indexed += other.documents_indexed;
        self.chunks_indexed += other.chunks_indexed;
        self.failures += other.failures;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryCheckpoint {
    last_document_id: i64,
    updated_at: String,
    stats: ReindexStatsSnapshot,
}

/// Persisted mirror of `ReindexStats` so a resumed run keeps its counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ReindexStatsSnapshot {
    documents_indexed: u64,
    chunks_indexed: u64,
    failures: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CheckpointFile {
    categories: BTreeMap<String, CategoryCheckpoint>,
}

/// Re-indexes entire categories from a document source.
pub struct BulkReindexer {
    indexer: DocumentIndexer,
    config: IndexConfig,
}

impl BulkReindexer {
    pub fn new(indexer: DocumentIndexer, config: IndexConfig) -> Self {
        Self { indexer, config }
    }

    /// Reindex every category and return the summed stats.
    pub fn reindex_all(
        &self,
        source: &dyn DocumentSource,
        dry_run: bool,
    ) -> DocMatchResult<ReindexStats> {
        let mut total = ReindexStats::default();
        for category in Category::ALL {
            let stats = self.reindex_category(source, category, dry_run)?;
            total.merge(&stats);
        }
        Ok(total)
    }

    /// Reindex one category, resuming from the checkpoint if one exists.
    ///
    /// `dry_run` chunks and counts without embedding, writing, or touching
    /// the checkpoint.
    pub fn reindex_category(
        &self,
        source: &dyn DocumentSource,
        category: Category,
        dry_run: bool,
    ) -> DocMatchResult<ReindexStats> {
        let mut checkpoint = if dry_run {
            CheckpointFile::default()
        } else {
            read_checkpoint(Path::new(&self.config.checkpoint_path))?
        };

        let (mut after_id, mut stats) = match checkpoint.categories.get(category.as_str()) {
            Some(cp) => {
                info!(
                    category = category.as_str(),
                    resume_after = cp.last_document_id,
                    "resuming reindex from checkpoint"
                );
                (
                    cp.last_document_id,
                    ReindexStats {
                        documents_indexed: cp.stats.documents_indexed,
                        chunks_indexed: cp.stats.chunks_indexed,
                        failures: cp.stats.failures,
                    },
                )
            }
            None => (0, ReindexStats::default()),
        };

        loop {
            let batch = source.documents_after(category, after_id, self.config.reindex_batch_size)?;
            if batch.is_empty() {
                break;
            }
            let batch_len = batch.len();

            for doc in batch {
                after_id = doc.document_id;
                if dry_run {
                    let chunks =
                        chunk_document(doc.document_id, category, &doc.content, &doc.metadata);
                    stats.documents_indexed += 1;
                    stats.chunks_indexed += chunks.len() as u64;
                    continue;
                }
                match self.indexer.index_document(
                    category,
                    doc.document_id,
                    &doc.content,
                    &doc.metadata,
                ) {
                    Ok(count) => {
                        stats.documents_indexed += 1;
                        stats.chunks_indexed += count as u64;
                    }
                    Err(e) => {
                        warn!(
                            category = category.as_str(),
                            document_id = doc.document_id,
                            error = %e,
                            "document skipped during reindex"
                        );
                        stats.failures += 1;
                    }
                }
            }

            if !dry_run {
                checkpoint.categories.insert(
                    category.as_str().to_string(),
                    CategoryCheckpoint {
                        last_document_id: after_id,
                        updated_at: Utc::now().to_rfc3339(),
                        stats: ReindexStatsSnapshot {
                            documents_indexed: stats.documents_indexed,
                            chunks_indexed: stats.chunks_indexed,
                            failures: stats.failures,
                        },
                    },
                );
                write_checkpoint(Path::new(&self.config.checkpoint_path), &checkpoint)?;
            }

            if batch_len < self.config.reindex_batch_size {
                break;
            }
        }

        // A finished category no longer needs its resume point.
        if !dry_run && checkpoint.categories.remove(category.as_str()).is_some() {
            write_checkpoint(Path::new(&self.config.checkpoint_path), &checkpoint)?;
        }

        info!(
            category = category.as_str(),
            documents = stats.documents_indexed,
            chunks = stats.chunks_indexed,
            failures = stats.failures,
            dry_run,
            "category reindex complete"
        );
        Ok(stats)
    }
}

fn checkpoint_err(path: &Path, e: impl std::fmt::Display) -> IndexError {
    IndexError::Checkpoint {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn read_checkpoint(path: &Path) -> DocMatchResult<CheckpointFile> {
    if !path.exists() {
        return Ok(CheckpointFile::default());
    }
    let raw = std::fs::read_to_string(path).map_err(|e| checkpoint_err(path, e))?;
    let parsed = serde_json::from_str(&raw).map_err(|e| checkpoint_err(path, e))?;
    Ok(parsed)
}

fn write_checkpoint(path: &Path, checkpoint: &CheckpointFile) -> DocMatchResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| checkpoint_err(path, e))?;
        }
    }
    let raw = serde_json::to_string_pretty(checkpoint).map_err(|e| checkpoint_err(path, e))?;
    std::fs::write(path, raw).map_err(|e| checkpoint_err(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use docmatch_core::chunk::Metadata;
    use docmatch_core::config::EmbeddingConfig;
    use docmatch_core::traits::SourceDocument;
    use docmatch_embeddings::EmbeddingEngine;
    use test_fixtures::{sample_spec, spec_metadata};

    use crate::store::VectorIndex;

    struct VecSource {
        docs: Vec<SourceDocument>,
    }

    impl DocumentSource for VecSource {
        fn documents_after(
            &self,
            category: Category,
            after_id: i64,
            limit: usize,
        ) -> DocMatchResult<Vec<SourceDocument>> {
            let mut out: Vec<SourceDocument> = self
                .docs
                .iter()
                .filter(|d| d.category == category && d.document_id > after_id)
                .cloned()
                .collect();
            out.sort_by_key(|d| d.document_id);
            out.truncate(limit);
            Ok(out)
        }
    }

    fn spec_doc(document_id: i64) -> SourceDocument {
        SourceDocument {
            document_id,
            category: Category::Spec,
            title: format!("Spec {document_id}"),
            content: sample_spec(),
            metadata: spec_metadata(),
        }
    }

    fn reindexer(checkpoint_path: &Path) -> (Arc<VectorIndex>, BulkReindexer) {
        let index = Arc::new(VectorIndex::open_in_memory().unwrap());
        let embeddings = Arc::new(EmbeddingEngine::new(EmbeddingConfig {
            provider: "tfidf".to_string(),
            dimensions: 64,
            ..Default::default()
        }));
        let indexer = DocumentIndexer::new(index.clone(), embeddings);
        let config = IndexConfig {
            db_path: String::new(),
            reindex_batch_size: 2,
            checkpoint_path: checkpoint_path.display().to_string(),
        };
        (index, BulkReindexer::new(indexer, config))
    }

    #[test]
    fn reindex_indexes_all_documents_in_batches() {
        let dir = tempfile::tempdir().unwrap();
        let cp = dir.path().join("checkpoint.json");
        let (index, reindexer) = reindexer(&cp);
        let source = VecSource {
            docs: (1..=5).map(spec_doc).collect(),
        };

        let stats = reindexer
            .reindex_category(&source, Category::Spec, false)
            .unwrap();
        assert_eq!(stats.documents_indexed, 5);
        assert_eq!(stats.failures, 0);
        assert_eq!(
            index.stats().unwrap().spec_entries,
            stats.chunks_indexed
        );
        // Completed runs leave no resume point behind.
        let file: CheckpointFile =
            serde_json::from_str(&std::fs::read_to_string(&cp).unwrap()).unwrap();
        assert!(file.categories.is_empty());
    }

    #[test]
    fn resume_skips_already_indexed_documents() {
        let dir = tempfile::tempdir().unwrap();
        let cp = dir.path().join("checkpoint.json");

        let mut file = CheckpointFile::default();
        file.categories.insert(
            "spec".to_string(),
            CategoryCheckpoint {
                last_document_id: 3,
                updated_at: Utc::now().to_rfc3339(),
                stats: ReindexStatsSnapshot {
                    documents_indexed: 3,
                    chunks_indexed: 9,
                    failures: 0,
                },
            },
        );
        write_checkpoint(&cp, &file).unwrap();

        let (_index, reindexer) = reindexer(&cp);
        let source = VecSource {
            docs: (1..=5).map(spec_doc).collect(),
        };
        let stats = reindexer
            .reindex_category(&source, Category::Spec, false)
            .unwrap();
        // 3 carried over from the checkpoint, 2 newly indexed.
        assert_eq!(stats.documents_indexed, 5);
    }

    #[test]
    fn dry_run_counts_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let cp = dir.path().join("checkpoint.json");
        let (index, reindexer) = reindexer(&cp);
        let source = VecSource {
            docs: (1..=3).map(spec_doc).collect(),
        };

        let stats = reindexer
            .reindex_category(&source, Category::Spec, true)
            .unwrap();
        assert_eq!(stats.documents_indexed, 3);
        assert!(stats.chunks_indexed > 0);
        assert_eq!(index.stats().unwrap().total(), 0);
        assert!(!cp.exists());
    }

    #[test]
    fn empty_source_is_a_clean_noop() {
        let dir = tempfile::tempdir().unwrap();
        let cp = dir.path().join("checkpoint.json");
        let (_index, reindexer) = reindexer(&cp);
        let source = VecSource { docs: Vec::new() };
        let stats = reindexer.reindex_all(&source, false).unwrap();
        assert_eq!(stats, ReindexStats::default());
    }

    #[test]
    fn categories_reindex_independently() {
        let dir = tempfile::tempdir().unwrap();
        let cp = dir.path().join("checkpoint.json");
        let (index, reindexer) = reindexer(&cp);
        let mut docs = vec![spec_doc(1)];
        docs.push(SourceDocument {
            document_id: 2,
            category: Category::TestSuite,
            title: "Tests".to_string(),
            content: test_fixtures::sample_test_suite(),
            metadata: Metadata::new(),
        });
        let source = VecSource { docs };

        reindexer.reindex_all(&source, false).unwrap();
        let stats = index.stats().unwrap();
        assert!(stats.spec_entries > 0);
        assert!(stats.test_entries > 0);
    }
}
