use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quadboard_core::Note;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{NoteStore, StoreError};

/// Notes held in memory and mirrored to a pretty-printed JSON array on disk.
///
/// Every mutation rewrites the whole file while the lock is held, so the
/// file always reflects a state the in-memory list has actually been in.
pub struct JsonFileStore {
    path: PathBuf,
    notes: Mutex<Vec<Note>>,
}

impl JsonFileStore {
    /// Load notes from `path`, creating the file with `[]` if it is absent.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let notes = match tokio::fs::read(&path).await {
            Ok(data) => {
                let notes: Vec<Note> = serde_json::from_slice(&data).map_err(|e| {
                    StoreError::Parse(format!("{}: {e}", path.display()))
                })?;
                info!("loaded {} notes from {}", notes.len(), path.display());
                notes
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("notes file {} does not exist, creating it", path.display());
                write_notes(&path, &[]).await?;
                Vec::new()
            }
            Err(e) => {
                return Err(StoreError::Io(format!("read {}: {e}", path.display())));
            }
        };
        Ok(Self {
            path,
            notes: Mutex::new(notes),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn write_notes(path: &Path, notes: &[Note]) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(notes)
        .map_err(|e| StoreError::Parse(format!("serialize notes: {e}")))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::Io(format!("mkdir {}: {e}", parent.display())))?;
    }
    // Write beside the target then rename, so a crash never leaves half a file.
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &data)
        .await
        .map_err(|e| StoreError::Io(format!("write {}: {e}", tmp.display())))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::Io(format!("rename to {}: {e}", path.display())))?;
    debug!("saved {} notes to {}", notes.len(), path.display());
    Ok(())
}

#[async_trait]
impl NoteStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.lock().await.clone())
    }

    async fn insert(&self, note: Note) -> Result<(), StoreError> {
        let mut notes = self.notes.lock().await;
        notes.push(note);
        if let Err(e) = write_notes(&self.path, &notes).await {
            notes.pop();
            return Err(e);
        }
        Ok(())
    }

    async fn update(&self, note: Note) -> Result<(), StoreError> {
        let mut notes = self.notes.lock().await;
        let idx = notes
            .iter()
            .position(|n| n.id == note.id)
            .ok_or_else(|| StoreError::NotFound(format!("note {}", note.id)))?;
        let previous = std::mem::replace(&mut notes[idx], note);
        if let Err(e) = write_notes(&self.path, &notes).await {
            notes[idx] = previous;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, quadrant: &str) -> Note {
        Note {
            id: id.to_string(),
            content: format!("content of {id}"),
            x: 10.0,
            y: 20.0,
            quadrant: quadrant.to_string(),
        }
    }

    #[tokio::test]
    async fn open_creates_empty_array_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("notes.json");
        let store = JsonFileStore::open(&path).await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk.trim(), "[]");
    }

    #[tokio::test]
    async fn open_creates_missing_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/dir/notes.json");
        JsonFileStore::open(&path).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn insert_appends_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(tmp.path().join("notes.json"))
            .await
            .unwrap();

        store.insert(note("a", "urgent-important")).await.unwrap();
        store.insert(note("b", "not-urgent-important")).await.unwrap();

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn insert_does_not_dedupe_ids() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(tmp.path().join("notes.json"))
            .await
            .unwrap();

        store.insert(note("dup", "urgent-important")).await.unwrap();
        store.insert(note("dup", "urgent-important")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_replaces_matching_note() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(tmp.path().join("notes.json"))
            .await
            .unwrap();
        store.insert(note("a", "urgent-important")).await.unwrap();

        let mut moved = note("a", "urgent-not-important");
        moved.x = 55.0;
        moved.content = "edited".into();
        store.update(moved.clone()).await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec![moved]);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(tmp.path().join("notes.json"))
            .await
            .unwrap();

        let err = store.update(note("ghost", "urgent-important")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn notes_survive_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("notes.json");
        {
            let store = JsonFileStore::open(&path).await.unwrap();
            store.insert(note("keep", "someday")).await.unwrap();
        }

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let notes = reopened.list().await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, "keep");
        // Unknown quadrant ids are stored verbatim.
        assert_eq!(notes[0].quadrant, "someday");
    }

    #[tokio::test]
    async fn file_is_pretty_printed() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("notes.json");
        let store = JsonFileStore::open(&path).await.unwrap();
        store.insert(note("a", "urgent-important")).await.unwrap();

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("\n  {"));
        assert!(on_disk.contains("\"quadrant\": \"urgent-important\""));
    }

    #[tokio::test]
    async fn malformed_file_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("notes.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::open(&path).await.err().unwrap();
        assert!(matches!(err, StoreError::Parse(_)));
    }
}
