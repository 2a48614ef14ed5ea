use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
