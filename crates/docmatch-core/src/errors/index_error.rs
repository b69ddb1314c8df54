/// Vector index errors for SQLite-backed storage.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("metadata serialization failed: {reason}")]
    Serialization { reason: String },

    #[error("checkpoint I/O failed at {path}: {reason}")]
    Checkpoint { path: String, reason: String },
}
