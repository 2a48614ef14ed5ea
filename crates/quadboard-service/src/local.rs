use std::sync::Arc;

use async_trait::async_trait;
use quadboard_core::{Note, NoteError};
use quadboard_store::{NoteStore, StoreError};

use crate::{NoteService, ServiceError};

/// Local implementation backed by a `NoteStore`.
#[derive(Clone)]
pub struct LocalService {
    store: Arc<dyn NoteStore>,
}

impl LocalService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<NoteError> for ServiceError {
    fn from(e: NoteError) -> Self {
        match e {
            NoteError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
        }
    }
}

#[async_trait]
impl NoteService for LocalService {
    async fn list_notes(&self) -> Result<Vec<Note>, ServiceError> {
        Ok(self.store.list().await?)
    }

    async fn add_note(&self, note: &Note) -> Result<(), ServiceError> {
        note.validate()?;
        Ok(self.store.insert(note.clone()).await?)
    }

    async fn update_note(&self, note: &Note) -> Result<(), ServiceError> {
        note.validate()?;
        Ok(self.store.update(note.clone()).await?)
    }
}
