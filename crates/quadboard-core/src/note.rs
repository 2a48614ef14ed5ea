use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::id::generate_note_id;
use crate::quadrant::Quadrant;
use crate::NoteError;

/// Text given to a freshly created note.
pub const NEW_NOTE_CONTENT: &str = "New Task";

/// Offset of a freshly created note inside its quadrant.
pub const NEW_NOTE_POSITION: Point = Point { x: 10.0, y: 10.0 };

/// A sticky note as stored by the server and sent over the wire.
///
/// `quadrant` is kept as a plain string: the server stores and echoes
/// whatever container id the client sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub quadrant: String,
}

impl Note {
    /// A fresh "New Task" note with a generated id at the default position.
    pub fn new_task(quadrant: &str) -> Self {
        Self {
            id: generate_note_id(),
            content: NEW_NOTE_CONTENT.to_string(),
            x: NEW_NOTE_POSITION.x,
            y: NEW_NOTE_POSITION.y,
            quadrant: quadrant.to_string(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The quadrant this note names, if it is one of the four known zones.
    pub fn known_quadrant(&self) -> Option<Quadrant> {
        Quadrant::from_str(&self.quadrant)
    }

    /// Minimal shape check applied by the server before storing.
    pub fn validate(&self) -> Result<(), NoteError> {
        if self.id.trim().is_empty() {
            return Err(NoteError::InvalidInput("note id must not be empty".into()));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(NoteError::InvalidInput(format!(
                "note {} has a non-finite position",
                self.id
            )));
        }
        Ok(())
    }
}
