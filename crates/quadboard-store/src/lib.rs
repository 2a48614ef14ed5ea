mod json_file;

pub use json_file::JsonFileStore;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use quadboard_core::Note;

/// File name used when no notes file is configured.
pub const DEFAULT_NOTES_FILE: &str = "notes.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Persistent collection of notes, kept in insertion order.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, oldest first.
    async fn list(&self) -> Result<Vec<Note>, StoreError>;

    /// Append a note. Ids are not checked for uniqueness.
    async fn insert(&self, note: Note) -> Result<(), StoreError>;

    /// Replace the first note with the same id.
    /// Returns `StoreError::NotFound` if no note has that id.
    async fn update(&self, note: Note) -> Result<(), StoreError>;
}

// -- Configuration --

/// Configuration for the note store backend.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Path of the JSON file holding all notes.
    /// When `None`, `notes.json` in the working directory.
    pub notes_file: Option<PathBuf>,
}

impl StoreConfig {
    /// Build from `QUADBOARD_NOTES_FILE`.
    pub fn from_env() -> Self {
        Self {
            notes_file: std::env::var_os("QUADBOARD_NOTES_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn notes_path(&self) -> PathBuf {
        self.notes_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTES_FILE))
    }
}

// -- Factory --

/// Open the configured store, creating an empty notes file if none exists.
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn NoteStore>, StoreError> {
    Ok(Arc::new(JsonFileStore::open(config.notes_path()).await?))
}
