use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector index and bulk-reindex configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// SQLite database path; empty means in-memory (tests).
    pub db_path: String,
    /// Documents per checkpoint batch during bulk reindex.
    pub reindex_batch_size: usize,
    /// Checkpoint file persisted between reindex runs.
    pub checkpoint_path: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            db_path: String::new(),
            reindex_batch_size: defaults::DEFAULT_REINDEX_BATCH_SIZE,
            checkpoint_path: defaults::DEFAULT_CHECKPOINT_PATH.to_string(),
        }
    }
}
