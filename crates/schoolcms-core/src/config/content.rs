//! Article content derivation settings.

use serde::{Deserialize, Serialize};

/// Controls how excerpts are derived from article content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Number of characters of tag-stripped content kept in a derived excerpt.
    #[serde(default = "default_excerpt_length")]
    pub excerpt_length: usize,
    /// Suffix appended to every derived excerpt.
    #[serde(default = "default_excerpt_suffix")]
    pub excerpt_suffix: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            excerpt_length: default_excerpt_length(),
            excerpt_suffix: default_excerpt_suffix(),
        }
    }
}

fn default_excerpt_length() -> usize {
    150
}

fn default_excerpt_suffix() -> String {
    "...".to_string()
}
