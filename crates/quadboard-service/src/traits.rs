use async_trait::async_trait;
use quadboard_core::Note;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Abstraction over note persistence.
///
/// The board client programs against this trait.
/// `HttpService` talks to a running quadboard-server.
/// `LocalService` wraps a `NoteStore` directly and backs the server routes.
#[async_trait]
pub trait NoteService: Send + Sync {
    async fn list_notes(&self) -> Result<Vec<Note>, ServiceError>;
    async fn add_note(&self, note: &Note) -> Result<(), ServiceError>;
    async fn update_note(&self, note: &Note) -> Result<(), ServiceError>;
}
