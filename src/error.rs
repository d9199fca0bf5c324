use thiserror::Error;

use crate::list::types::{ItemId, NoteId};

/// Failures reported by a [`NoteRepository`](crate::list::NoteRepository).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("note {0} not found")]
    NotFound(NoteId),

    #[error("list item {0} not found")]
    ItemNotFound(ItemId),

    #[error("storage backend error: {0}")]
    Backend(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
