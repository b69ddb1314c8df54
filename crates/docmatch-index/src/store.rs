//! SQLite-backed vector store.
//!
//! One `entries` table holds every category; the category column keeps
//! the per-category collections isolated. Embeddings are stored as
//! little-endian f32 BLOBs and searched with a brute-force cosine scan,
//! which is plenty for collections in the low tens of thousands.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};
use tracing::debug;

use docmatch_core::category::Category;
use docmatch_core::errors::{DocMatchResult, IndexError};

use crate::metadata::FlatMetadata;

/// Maps any rusqlite failure into the index error domain.
fn sqlite_err(e: impl std::fmt::Display) -> IndexError {
    IndexError::Sqlite {
        message: e.to_string(),
    }
}

/// One chunk row ready for insertion.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub entry_id: String,
    pub document_id: i64,
    pub text: String,
    pub embedding: Vec<f32>,
    pub metadata: FlatMetadata,
}

/// A scored row returned from `search`.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub entry_id: String,
    pub document_id: i64,
    pub text: String,
    pub similarity: f64,
    pub metadata: FlatMetadata,
}

/// Per-category entry counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub spec_entries: u64,
    pub design_entries: u64,
    pub test_entries: u64,
}

impl IndexStats {
    pub fn total(&self) -> u64 {
        self.spec_entries + self.design_entries + self.test_entries
    }
}

/// The vector index. A single writer connection behind a Mutex; the
/// workload is indexer-driven and never write-contended.
pub struct VectorIndex {
    conn: Mutex<Connection>,
}

impl VectorIndex {
    /// Open (and initialize) a file-backed index.
    pub fn open(path: &Path) -> DocMatchResult<Self> {
        let conn = Connection::open(path).map_err(sqlite_err)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA busy_timeout = 5000;
            PRAGMA foreign_keys = ON;
            ",
        )
        .map_err(sqlite_err)?;
        let index = Self {
            conn: Mutex::new(conn),
        };
        index.initialize()?;
        Ok(index)
    }

    /// Open an in-memory index (tests).
    pub fn open_in_memory() -> DocMatchResult<Self> {
        let conn = Connection::open_in_memory().map_err(sqlite_err)?;
        let index = Self {
            conn: Mutex::new(conn),
        };
        index.initialize()?;
        Ok(index)
    }

    fn initialize(&self) -> DocMatchResult<()> {
        self.with_conn(|conn| {
            conn.execute_batch(
                "
                CREATE TABLE IF NOT EXISTS entries (
                    id          INTEGER PRIMARY KEY,
                    category    TEXT NOT NULL,
                    entry_id    TEXT NOT NULL,
                    document_id INTEGER NOT NULL,
                    text        TEXT NOT NULL,
                    embedding   BLOB NOT NULL,
                    dimensions  INTEGER NOT NULL,
                    metadata    TEXT NOT NULL,
                    UNIQUE(category, entry_id)
                );
                CREATE INDEX IF NOT EXISTS idx_entries_category_doc
                    ON entries(category, document_id);
                ",
            )
            .map_err(sqlite_err)?;
            Ok(())
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> DocMatchResult<T>,
    ) -> DocMatchResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| sqlite_err(format!("connection lock poisoned: {e}")))?;
        f(&conn)
    }

    /// Replace every entry of a document atomically.
    ///
    /// Delete-then-insert inside a SAVEPOINT: stale chunks from a longer
    /// previous version can never survive a re-index, and a failure rolls
    /// the old state back intact.
    pub fn upsert_document(
        &self,
        category: Category,
        document_id: i64,
        entries: &[IndexEntry],
    ) -> DocMatchResult<usize> {
        self.with_conn(|conn| {
            conn.execute_batch("SAVEPOINT upsert_doc")
                .map_err(sqlite_err)?;
            match upsert_inner(conn, category, document_id, entries) {
                Ok(count) => {
                    conn.execute_batch("RELEASE upsert_doc").map_err(sqlite_err)?;
                    debug!(
                        category = category.as_str(),
                        document_id,
                        chunks = count,
                        "document upserted"
                    );
                    Ok(count)
                }
                Err(e) => {
                    let _ = conn.execute_batch("ROLLBACK TO upsert_doc");
                    let _ = conn.execute_batch("RELEASE upsert_doc");
                    Err(e)
                }
            }
        })
    }

    /// Remove every entry of a document. Returns the number of rows
    /// deleted; deleting an unknown document is a no-op, not an error.
    pub fn delete_document(&self, category: Category, document_id: i64) -> DocMatchResult<usize> {
        self.with_conn(|conn| {
            let deleted = conn
                .execute(
                    "DELETE FROM entries WHERE category = ?1 AND document_id = ?2",
                    params![category.as_str(), document_id],
                )
                .map_err(sqlite_err)?;
            Ok(deleted)
        })
    }

    /// Brute-force cosine search within one category.
    ///
    /// `filter` is flat metadata equality; every pair must match. A
    /// zero-norm query (blank text upstream) returns no hits.
    pub fn search(
        &self,
        category: Category,
        query: &[f32],
        top_k: usize,
        filter: Option<&FlatMetadata>,
    ) -> DocMatchResult<Vec<SearchHit>> {
        let query_norm_sq: f64 = query.iter().map(|x| (*x as f64) * (*x as f64)).sum();
        if query_norm_sq == 0.0 || top_k == 0 {
            return Ok(Vec::new());
        }

        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT entry_id, document_id, text, embedding, dimensions, metadata
                     FROM entries WHERE category = ?1",
                )
                .map_err(sqlite_err)?;

            let rows = stmt
                .query_map(params![category.as_str()], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Vec<u8>>(3)?,
                        row.get::<_, i64>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                })
                .map_err(sqlite_err)?;

            let mut hits: Vec<SearchHit> = Vec::new();
            for row in rows {
                let (entry_id, document_id, text, blob, dims, meta_json) =
                    row.map_err(sqlite_err)?;
                if dims as usize != query.len() {
                    continue;
                }
                let metadata: FlatMetadata =
                    serde_json::from_str(&meta_json).map_err(|e| IndexError::Serialization {
                        reason: format!("entry {entry_id}: {e}"),
                    })?;
                if let Some(wanted) = filter {
                    if !wanted.iter().all(|(k, v)| metadata.get(k) == Some(v)) {
                        continue;
                    }
                }
                let stored = bytes_to_f32(&blob);
                hits.push(SearchHit {
                    entry_id,
                    document_id,
                    text,
                    similarity: cosine_similarity(query, &stored),
                    metadata,
                });
            }

            hits.sort_by(|a, b| {
                b.similarity
                    .partial_cmp(&a.similarity)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            hits.truncate(top_k);
            Ok(hits)
        })
    }

    /// All entry ids of a document, ordered by chunk position.
    pub fn entry_ids(&self, category: Category, document_id: i64) -> DocMatchResult<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT entry_id FROM entries
                     WHERE category = ?1 AND document_id = ?2 ORDER BY id",
                )
                .map_err(sqlite_err)?;
            let ids = stmt
                .query_map(params![category.as_str(), document_id], |row| row.get(0))
                .map_err(sqlite_err)?
                .collect::<Result<Vec<String>, _>>()
                .map_err(sqlite_err)?;
            Ok(ids)
        })
    }

    pub fn stats(&self) -> DocMatchResult<IndexStats> {
        self.with_conn(|conn| {
            let mut stats = IndexStats::default();
            let mut stmt = conn
                .prepare("SELECT category, COUNT(*) FROM entries GROUP BY category")
                .map_err(sqlite_err)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })
                .map_err(sqlite_err)?;
            for row in rows {
                let (category, count) = row.map_err(sqlite_err)?;
                match Category::parse(&category) {
                    Some(Category::Spec) => stats.spec_entries = count as u64,
                    Some(Category::Design) => stats.design_entries = count as u64,
                    Some(Category::TestSuite) => stats.test_entries = count as u64,
                    None => {}
                }
            }
            Ok(stats)
        })
    }
}

fn upsert_inner(
    conn: &Connection,
    category: Category,
    document_id: i64,
    entries: &[IndexEntry],
) -> DocMatchResult<usize> {
    conn.execute(
        "DELETE FROM entries WHERE category = ?1 AND document_id = ?2",
        params![category.as_str(), document_id],
    )
    .map_err(sqlite_err)?;

    let mut stmt = conn
        .prepare(
            "INSERT INTO entries (category, entry_id, document_id, text, embedding, dimensions, metadata)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(sqlite_err)?;

    for entry in entries {
        let meta_json =
            serde_json::to_string(&entry.metadata).map_err(|e| IndexError::Serialization {
                reason: format!("entry {}: {e}", entry.entry_id),
            })?;
        stmt.execute(params![
            category.as_str(),
            entry.entry_id,
            entry.document_id,
            entry.text,
            f32_to_bytes(&entry.embedding),
            entry.embedding.len() as i64,
            meta_json,
        ])
        .map_err(sqlite_err)?;
    }
    Ok(entries.len())
}

fn f32_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn bytes_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
