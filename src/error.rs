//! Error types for codeblock

use thiserror::Error;

use crate::lines::HighlightSpecError;

/// Result type alias for codeblock operations
pub type Result<T> = std::result::Result<T, CodeblockError>;

/// Errors raised while building grammars or rendering a block
#[derive(Error, Debug)]
pub enum CodeblockError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    HighlightSpec(#[from] HighlightSpecError),

    #[error("grammar `{grammar}`: rule `{rule}` has an invalid pattern: {source}")]
    InvalidPattern {
        grammar: String,
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("grammar `{grammar}`: rule `{rule}` uses unknown category `{name}`")]
    UnknownCategory {
        grammar: String,
        rule: String,
        name: String,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Failure reported by a clipboard backend
///
/// Never propagated into rendering; the copy control only logs it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard access denied")]
    PermissionDenied,

    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}
