/// Feature-extraction errors for the AI-backed tier.
///
/// Malformed responses are not represented here; they are recovered
/// locally via the heuristic fallback and never surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("extraction request failed: {reason}")]
    Transport { reason: String },

    #[error("extraction request rejected: HTTP {status}")]
    Rejected { status: u16 },

    #[error("extraction request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}
