//! Error types for loglit

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for loglit operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("highlight group {0:?} not found")]
    GroupNotFound(String),

    #[error("highlight group {group:?} links to missing group {target:?}")]
    LinkTargetNotFound { group: String, target: String },

    #[error("cyclic highlight link: {}", chain.join(" -> "))]
    CyclicLink { chain: Vec<String> },

    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid keyword {0:?}: keywords must be a single word")]
    InvalidKeyword(String),

    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),

    #[error("span [{start}, {end}) is out of bounds for a line of {len} bytes")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
