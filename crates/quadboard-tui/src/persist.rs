use std::sync::Arc;

use quadboard_core::Note;
use quadboard_service::NoteService;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Fire-and-forget bridge from the synchronous UI to a `NoteService`.
///
/// Writes are spawned on the runtime behind `handle` and never awaited by
/// the UI. Failures are logged and otherwise dropped: there is no retry and
/// no rollback of the optimistic UI change.
#[derive(Clone)]
pub struct Persister {
    service: Arc<dyn NoteService>,
    handle: Handle,
}

impl Persister {
    pub fn new(service: Arc<dyn NoteService>, handle: Handle) -> Self {
        Self { service, handle }
    }

    /// Fetch every note, blocking the caller. Returns an empty list on failure.
    ///
    /// Must not be called from inside the runtime's own worker threads.
    pub fn fetch_all(&self) -> Vec<Note> {
        match self.handle.block_on(self.service.list_notes()) {
            Ok(notes) => notes,
            Err(e) => {
                error!("error loading notes: {e}");
                Vec::new()
            }
        }
    }

    pub fn add(&self, note: Note) -> JoinHandle<()> {
        let service = self.service.clone();
        self.handle.spawn(async move {
            match service.add_note(&note).await {
                Ok(()) => debug!("saved note {}", note.id),
                Err(e) => error!("error adding note {}: {e}", note.id),
            }
        })
    }

    pub fn update(&self, note: Note) -> JoinHandle<()> {
        let service = self.service.clone();
        self.handle.spawn(async move {
            match service.update_note(&note).await {
                Ok(()) => debug!("updated note {}", note.id),
                Err(e) => error!("error updating note {}: {e}", note.id),
            }
        })
    }
}
