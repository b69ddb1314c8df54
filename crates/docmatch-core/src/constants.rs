//! Workspace-wide constants.

/// Embedding vector dimensions (multilingual-e5-base output size).
pub const EMBEDDING_DIMENSIONS: usize = 768;

/// Maximum chunk size in estimated tokens before paragraph splitting kicks in.
pub const MAX_CHUNK_TOKENS: usize = 1024;

/// Rough token estimate: 1 token per 4 characters.
pub const CHARS_PER_TOKEN: usize = 4;

/// Default embedding batch size when neither config nor env provide one.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Maximum number of keywords extracted from a task description.
pub const MAX_KEYWORDS: usize = 10;

/// Maximum number of domain entities extracted from a task description.
pub const MAX_ENTITIES: usize = 5;

/// Maximum number of terms in a derived search query.
pub const MAX_QUERY_TERMS: usize = 15;
