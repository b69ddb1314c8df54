//! Configuration for every subsystem, loadable from TOML with
//! environment overrides for the operationally interesting knobs.

pub mod defaults;

mod analysis_config;
mod embedding_config;
mod index_config;
mod matcher_config;
mod search_config;

pub use analysis_config::AnalysisConfig;
pub use embedding_config::EmbeddingConfig;
pub use index_config::IndexConfig;
pub use matcher_config::MatcherConfig;
pub use search_config::SearchConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{DocMatchError, DocMatchResult};

/// Top-level configuration gathering every subsystem section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocMatchConfig {
    pub embedding: EmbeddingConfig,
    pub index: IndexConfig,
    pub search: SearchConfig,
    pub analysis: AnalysisConfig,
    pub matcher: MatcherConfig,
}

impl DocMatchConfig {
    /// Parse a TOML document. Unknown keys are ignored; missing sections
    /// take their defaults.
    pub fn from_toml(input: &str) -> DocMatchResult<Self> {
        toml::from_str(input).map_err(|e| DocMatchError::Config {
            reason: e.to_string(),
        })
    }

    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: &std::path::Path) -> DocMatchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DocMatchError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Ok(Self::from_toml(&content)?.with_env_overrides())
    }

    /// Apply environment overrides to every section that has them.
    pub fn with_env_overrides(mut self) -> Self {
        self.embedding = self.embedding.with_env_overrides();
        self.search = self.search.with_env_overrides();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = DocMatchConfig::from_toml("").unwrap();
        assert_eq!(config.search.alpha, defaults::DEFAULT_ALPHA);
        assert_eq!(config.embedding.dimensions, 768);
        assert_eq!(config.matcher.oversample_factor, 4);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = DocMatchConfig::from_toml("[search]\nalpha = 0.7\n").unwrap();
        assert_eq!(config.search.alpha, 0.7);
        assert_eq!(
            config.matcher.confidence_threshold,
            defaults::DEFAULT_CONFIDENCE_THRESHOLD
        );
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = DocMatchConfig::from_toml("[search\nalpha").unwrap_err();
        assert!(matches!(err, DocMatchError::Config { .. }));
    }
}
