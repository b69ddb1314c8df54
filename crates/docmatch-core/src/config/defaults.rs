//! Named default values for all config sections.

pub const DEFAULT_EMBEDDING_MODEL: &str = "intfloat/multilingual-e5-base";
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "onnx";
pub const DEFAULT_CACHE_CAPACITY: u64 = 100_000;

pub const DEFAULT_ALPHA: f64 = 0.4;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.0;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_OVERSAMPLE_FACTOR: usize = 4;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_CATEGORY_FILTER_BOOST: f64 = 1.2;

pub const DEFAULT_FAST_TIER_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EXTRACTION_MODEL: &str = "claude-sonnet-4-20250514";

pub const DEFAULT_REINDEX_BATCH_SIZE: usize = 50;
pub const DEFAULT_CHECKPOINT_PATH: &str = "data/reindex_checkpoint.json";
