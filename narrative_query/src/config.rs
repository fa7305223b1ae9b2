//! Query defaults and the errors raised while loading them.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Sizes used by the convenience wrappers on [`crate::NarrativeQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// How many narratives the dashboard ranks.
    pub top_narratives: usize,

    /// How many events the recent-events feed shows.
    pub recent_events: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_narratives: 5,
            recent_events: 10,
        }
    }
}

impl QueryConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid query config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("could not encode query config: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.top_narratives, 5);
        assert_eq!(config.recent_events, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = QueryConfig::from_toml_str("top_narratives = 3\n").unwrap();
        assert_eq!(config.top_narratives, 3);
        assert_eq!(config.recent_events, 10);

        assert_eq!(QueryConfig::from_toml_str("").unwrap(), QueryConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = QueryConfig::from_toml_str("top_narratives = \"many\"").unwrap_err();
        assert!(matches!(err, QueryError::Toml(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = QueryConfig {
            top_narratives: 7,
            recent_events: 2,
        };
        let encoded = config.to_toml_string().unwrap();
        assert_eq!(QueryConfig::from_toml_str(&encoded).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = QueryConfig::load(Path::new("/nonexistent/query.toml")).unwrap_err();
        assert!(matches!(err, QueryError::Io(_)));
    }
}
