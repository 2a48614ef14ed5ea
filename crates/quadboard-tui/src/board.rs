use quadboard_core::{Note, Point, Quadrant, Rect};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::drag;
use crate::persist::Persister;
use crate::surface::{NoteElement, Surface};

/// A note handed to the backend, with the in-flight request.
///
/// UI callers drop `request`; nothing waits on persistence.
pub struct Pending {
    pub note: Note,
    pub request: JoinHandle<()>,
}

/// Owns the surface and wires user gestures to the drag tracker and the backend.
pub struct Board {
    surface: Surface,
    persister: Persister,
    hover: Option<Point>,
}

impl Board {
    pub fn new(persister: Persister) -> Self {
        Self {
            surface: Surface::with_quadrants(),
            persister,
            hover: None,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Update quadrant bounds after a layout pass. Unknown ids are ignored.
    pub fn set_layout(&mut self, bounds: &[(Quadrant, Rect)]) {
        for (quadrant, rect) in bounds {
            self.surface.set_bounds(quadrant.as_str(), *rect);
        }
    }

    /// Fetch all notes and put one element per note into its quadrant.
    /// Returns how many were placed.
    pub fn load_notes(&mut self) -> usize {
        let notes = self.persister.fetch_all();
        let placed = self.materialize(notes);
        info!("loaded {placed} notes");
        placed
    }

    /// Notes naming a quadrant this board does not have are logged and skipped.
    pub fn materialize(&mut self, notes: Vec<Note>) -> usize {
        let mut placed = 0;
        for note in notes {
            match self
                .surface
                .append_child(&note.quadrant, NoteElement::from_note(&note))
            {
                Ok(()) => placed += 1,
                Err(_) => error!("Quadrant {} not found for note {}", note.quadrant, note.id),
            }
        }
        placed
    }

    /// Quadrant under the last known pointer position.
    pub fn hovered_quadrant(&self) -> Option<&str> {
        self.hover.and_then(|p| self.surface.quadrant_at(p))
    }

    pub fn hover(&mut self, pointer: Point) {
        self.hover = Some(pointer);
    }

    /// Add a "New Task" note to the hovered quadrant (or the default one),
    /// show it immediately, then ask the backend to store it.
    pub fn create_note(&mut self) -> Option<Pending> {
        let quadrant = self
            .hovered_quadrant()
            .unwrap_or(Quadrant::DEFAULT.as_str())
            .to_string();
        let note = Note::new_task(&quadrant);
        if let Err(e) = self
            .surface
            .append_child(&quadrant, NoteElement::from_note(&note))
        {
            error!("cannot create note: {e}");
            return None;
        }
        info!("created note {} in {quadrant}", note.id);
        let request = self.persister.add(note.clone());
        Some(Pending { note, request })
    }

    // -- Pointer gestures --

    pub fn pointer_down(&mut self, pointer: Point) -> bool {
        self.hover = Some(pointer);
        match self.surface.element_at(pointer).map(str::to_string) {
            Some(id) => drag::pointer_down(&mut self.surface, &id, pointer),
            None => {
                drag::cancel(&mut self.surface);
                false
            }
        }
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        self.hover = Some(pointer);
        drag::pointer_move(&mut self.surface, pointer);
    }

    pub fn pointer_up(&mut self) -> Option<Pending> {
        let note = drag::pointer_up(&mut self.surface)?;
        let request = self.persister.update(note.clone());
        Some(Pending { note, request })
    }

    pub fn is_dragging(&self) -> bool {
        self.surface.active_drag().is_some()
    }

    // -- Editing --

    pub fn double_click(&mut self, pointer: Point) -> bool {
        drag::cancel(&mut self.surface);
        match self.surface.element_at(pointer).map(str::to_string) {
            Some(id) => drag::double_click(&mut self.surface, &id),
            None => false,
        }
    }

    pub fn blur(&mut self) -> Option<String> {
        drag::blur(&mut self.surface)
    }

    /// Id of the note currently being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        self.surface
            .focused()
            .filter(|id| self.surface.find(id).is_some_and(|e| e.editable))
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(element) = self.editing_element() {
            element.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(element) = self.editing_element() {
            element.text.pop();
        }
    }

    fn editing_element(&mut self) -> Option<&mut NoteElement> {
        let id = self.editing()?.to_string();
        self.surface.find_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use quadboard_service::{NoteService, ServiceError};
    use tokio::runtime::Runtime;

    use super::*;
    use crate::test_support::capture_logs;

    #[derive(Default)]
    struct RecordingService {
        stored: Vec<Note>,
        fail: bool,
        calls: Mutex<Vec<(&'static str, Note)>>,
    }

    #[async_trait]
    impl NoteService for RecordingService {
        async fn list_notes(&self) -> Result<Vec<Note>, ServiceError> {
            if self.fail {
                return Err(ServiceError::Internal("connection refused".into()));
            }
            Ok(self.stored.clone())
        }

        async fn add_note(&self, note: &Note) -> Result<(), ServiceError> {
            self.calls.lock().unwrap().push(("add", note.clone()));
            if self.fail {
                return Err(ServiceError::Internal("connection refused".into()));
            }
            Ok(())
        }

        async fn update_note(&self, note: &Note) -> Result<(), ServiceError> {
            self.calls.lock().unwrap().push(("update", note.clone()));
            if self.fail {
                return Err(ServiceError::Internal("connection refused".into()));
            }
            Ok(())
        }
    }

    fn note(id: &str, quadrant: &str, x: f64, y: f64) -> Note {
        Note {
            id: id.into(),
            content: format!("content {id}"),
            x,
            y,
            quadrant: quadrant.into(),
        }
    }

    /// 800x800 board split into four 400x400 quadrants.
    fn layout() -> Vec<(Quadrant, Rect)> {
        vec![
            (Quadrant::UrgentImportant, Rect::new(0.0, 0.0, 399.0, 399.0)),
            (Quadrant::NotUrgentImportant, Rect::new(400.0, 0.0, 799.0, 399.0)),
            (Quadrant::UrgentNotImportant, Rect::new(0.0, 400.0, 399.0, 799.0)),
            (Quadrant::NotUrgentNotImportant, Rect::new(400.0, 400.0, 799.0, 799.0)),
        ]
    }

    fn board_with(rt: &Runtime, service: Arc<RecordingService>) -> Board {
        let mut board = Board::new(Persister::new(service, rt.handle().clone()));
        board.set_layout(&layout());
        board
    }

    #[test]
    fn load_places_each_note_in_its_quadrant() {
        let rt = Runtime::new().unwrap();
        let service = Arc::new(RecordingService {
            stored: vec![
                note("a", "urgent-important", 10.0, 10.0),
                note("b", "not-urgent-not-important", 30.0, 5.0),
            ],
            ..Default::default()
        });
        let mut board = board_with(&rt, service);

        assert_eq!(board.load_notes(), 2);
        assert_eq!(board.surface().parent_of("a"), Some("urgent-important"));
        assert_eq!(board.surface().parent_of("b"), Some("not-urgent-not-important"));
        let b = board.surface().find("b").unwrap();
        assert_eq!((b.left, b.top), (30.0, 5.0));
        assert_eq!(b.text, "content b");
    }

    #[test]
    fn unknown_quadrant_is_skipped_others_still_load() {
        let rt = Runtime::new().unwrap();
        let service = Arc::new(RecordingService {
            stored: vec![
                note("a", "urgent-important", 10.0, 10.0),
                note("lost", "delegate-later", 10.0, 10.0),
                note("c", "urgent-not-important", 10.0, 10.0),
            ],
            ..Default::default()
        });
        let mut board = board_with(&rt, service);

        let (placed, logs) = capture_logs(|| board.load_notes());
        assert_eq!(placed, 2);
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("Quadrant delegate-later not found for note lost"));
        assert!(board.surface().find("lost").is_none());
        assert!(board.surface().find("a").is_some());
        assert!(board.surface().find("c").is_some());
    }

    #[test]
    fn failed_load_leaves_empty_board() {
        let rt = Runtime::new().unwrap();
        let service = Arc::new(RecordingService {
            fail: true,
            ..Default::default()
        });
        let mut board = board_with(&rt, service);

        assert_eq!(board.load_notes(), 0);
        assert_eq!(board.surface().note_count(), 0);
    }

    #[test]
    fn create_without_hover_defaults_to_urgent_important() {
        let rt = Runtime::new().unwrap();
        let service = Arc::new(RecordingService::default());
        let mut board = board_with(&rt, service.clone());

        let pending = board.create_note().unwrap();
        assert_eq!(pending.note.quadrant, "urgent-important");
        assert_eq!(pending.note.content, "New Task");
        assert_eq!((pending.note.x, pending.note.y), (10.0, 10.0));
        assert_eq!(
            board.surface().parent_of(&pending.note.id),
            Some("urgent-important")
        );

        rt.block_on(pending.request).unwrap();
        let calls = service.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "add");
        assert_eq!(calls[0].1, pending.note);
    }

    #[test]
    fn create_uses_hovered_quadrant() {
        let rt = Runtime::new().unwrap();
        let mut board = board_with(&rt, Arc::new(RecordingService::default()));

        board.hover(Point::new(600.0, 600.0));
        let pending = board.create_note().unwrap();
        assert_eq!(pending.note.quadrant, "not-urgent-not-important");
    }

    #[test]
    fn create_is_optimistic_when_backend_fails() {
        let rt = Runtime::new().unwrap();
        let service = Arc::new(RecordingService {
            fail: true,
            ..Default::default()
        });
        let mut board = board_with(&rt, service.clone());

        let pending = board.create_note().unwrap();
        rt.block_on(pending.request).unwrap();

        assert_eq!(service.calls.lock().unwrap().len(), 1);
        assert!(board.surface().find(&pending.note.id).is_some());
    }

    #[test]
    fn drag_and_drop_sends_update_with_final_offsets() {
        let rt = Runtime::new().unwrap();
        let service = Arc::new(RecordingService {
            stored: vec![note("a", "urgent-important", 10.0, 10.0)],
            ..Default::default()
        });
        let mut board = board_with(&rt, service.clone());
        board.load_notes();

        assert!(board.pointer_down(Point::new(15.0, 15.0)));
        assert!(board.is_dragging());
        board.pointer_move(Point::new(500.0, 100.0));
        let pending = board.pointer_up().unwrap();
        rt.block_on(pending.request).unwrap();

        let element = board.surface().find("a").unwrap();
        let calls = service.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "update");
        assert_eq!(calls[0].1.quadrant, "not-urgent-important");
        assert_eq!((calls[0].1.x, calls[0].1.y), (element.left, element.top));
        assert_eq!(calls[0].1.content, "content a");
        assert!(!board.is_dragging());
    }

    #[test]
    fn pointer_down_on_empty_space_starts_nothing() {
        let rt = Runtime::new().unwrap();
        let mut board = board_with(&rt, Arc::new(RecordingService::default()));

        assert!(!board.pointer_down(Point::new(300.0, 300.0)));
        assert!(board.pointer_up().is_none());
    }

    #[test]
    fn press_on_empty_space_ends_unfinished_drag() {
        let rt = Runtime::new().unwrap();
        let service = Arc::new(RecordingService {
            stored: vec![note("a", "urgent-important", 10.0, 10.0)],
            ..Default::default()
        });
        let mut board = board_with(&rt, service.clone());
        board.load_notes();

        assert!(board.pointer_down(Point::new(12.0, 12.0)));
        // Release lost; the next press lands on empty board.
        assert!(!board.pointer_down(Point::new(300.0, 300.0)));
        assert!(!board.is_dragging());
        assert!(!board.surface().find("a").unwrap().is_dragging());
        assert!(board.pointer_up().is_none());
        assert!(service.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn edit_mode_types_into_note_and_blocks_drag() {
        let rt = Runtime::new().unwrap();
        let service = Arc::new(RecordingService {
            stored: vec![note("a", "urgent-important", 10.0, 10.0)],
            ..Default::default()
        });
        let mut board = board_with(&rt, service.clone());
        board.load_notes();

        assert!(board.double_click(Point::new(12.0, 12.0)));
        assert_eq!(board.editing(), Some("a"));
        assert!(!board.pointer_down(Point::new(12.0, 12.0)));

        board.backspace();
        board.type_char('!');
        assert_eq!(board.surface().find("a").unwrap().text, "content !");

        assert_eq!(board.blur().as_deref(), Some("a"));
        assert_eq!(board.editing(), None);
        board.type_char('x');
        assert_eq!(board.surface().find("a").unwrap().text, "content !");

        // The edited text goes out with the next drop.
        assert!(board.pointer_down(Point::new(12.0, 12.0)));
        board.pointer_move(Point::new(20.0, 20.0));
        let pending = board.pointer_up().unwrap();
        rt.block_on(pending.request).unwrap();
        assert_eq!(pending.note.content, "content !");
    }
}
