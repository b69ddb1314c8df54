//! Trait seams between subsystems.

use crate::category::Category;
use crate::chunk::Metadata;
use crate::document::DocumentContent;
use crate::errors::{AnalysisError, DocMatchResult};

/// Turns text into fixed-dimension vectors.
///
/// Implementations must be deterministic for identical input and safe to
/// call from multiple threads.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> DocMatchResult<Vec<f32>>;

    /// Embed many texts in one provider call. Output order matches input
    /// order. Default implementation loops over `embed`.
    fn embed_batch(&self, texts: &[String]) -> DocMatchResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    fn dimensions(&self) -> usize;

    fn name(&self) -> &str;
}

/// A structured-output completion API used by the AI extraction tier.
///
/// The response is expected to be a JSON object; parsing and validation
/// happen on the caller's side.
pub trait CompletionClient: Send + Sync {
    fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String, AnalysisError>;
}

/// A document record handed to the bulk reindexer.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub document_id: i64,
    pub category: Category,
    pub title: String,
    pub content: DocumentContent,
    pub metadata: Metadata,
}

/// Supplies documents for bulk re-indexing, ordered by ascending id so a
/// checkpoint can resume after the last processed document.
pub trait DocumentSource {
    /// Documents of `category` with id strictly greater than `after_id`,
    /// ordered ascending, at most `limit`.
    fn documents_after(
        &self,
        category: Category,
        after_id: i64,
        limit: usize,
    ) -> DocMatchResult<Vec<SourceDocument>>;
}
