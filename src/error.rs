//! Error types for content handling

use std::path::PathBuf;

/// Errors raised while reading or writing post content
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The document does not contain an opening and closing `---` delimiter
    #[error("malformed document {source_name}: missing frontmatter delimiters")]
    MalformedDocument { source_name: String },

    /// A file name that is not a single plain path component
    #[error("invalid post file name: {0:?}")]
    InvalidName(String),

    #[error("post already exists: {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;
