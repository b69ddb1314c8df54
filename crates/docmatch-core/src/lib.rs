//! # docmatch-core
//!
//! Foundation crate for the document-matching subsystem.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod category;
pub mod chunk;
pub mod config;
pub mod constants;
pub mod document;
pub mod errors;
pub mod features;
pub mod matching;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use category::Category;
pub use chunk::{Chunk, Metadata};
pub use config::DocMatchConfig;
pub use document::DocumentContent;
pub use errors::{DocMatchError, DocMatchResult};
pub use features::{Complexity, Intent, TaskFeatures};
pub use matching::{DocumentMatch, ScoreBreakdown, SuggestedAction};
