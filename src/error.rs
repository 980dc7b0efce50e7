// src/error.rs
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A relative path resolved outside the project root. Never auto-corrected.
    #[error("Path escapes project root: {0}")]
    OutOfBounds(String),

    #[error("Project not loaded")]
    NotLoaded,

    // Deliberately carries no detail; this text can reach the preview surface.
    #[error("Not found")]
    NotFound,

    #[error("Failed to index '{}': {source}", .path.display())]
    Indexing { path: PathBuf, source: io::Error },

    #[error("Search aborted while reading '{}': {source}", .path.display())]
    Search { path: PathBuf, source: io::Error },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Settings error: {0}")]
    Settings(#[from] rusqlite::Error),
}

impl EditorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EditorError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
