//! Error types for barath-render.

use thiserror::Error;

/// Result type for barath-render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised around the parser. Parsing itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::Config`].
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The clipboard rejected a write.
    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    /// A copy was requested for a block that holds no code.
    #[error("Block {0} is not a code block")]
    NotCodeBlock(usize),
}
