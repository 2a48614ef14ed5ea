//! The on-screen element tree.
//!
//! A `Surface` is an ordered list of quadrant containers, each owning the note
//! elements rendered inside it. It is the client's only copy of board state:
//! a note's quadrant is whichever container currently holds its element, and
//! its position is the element's `left`/`top` relative to that container.

use quadboard_core::geometry::first_containing;
use quadboard_core::{Note, Point, Quadrant, Rect};
use thiserror::Error;

use crate::drag::DragState;

/// Rendered note width in cells, borders included.
pub const NOTE_WIDTH: f64 = 18.0;
/// Rendered note height in cells, borders included.
pub const NOTE_HEIGHT: f64 = 4.0;

#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    #[error("quadrant {0} not found")]
    MissingContainer(String),

    #[error("note element {0} not found")]
    MissingElement(String),
}

/// A sticky note as it lives on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteElement {
    pub id: String,
    pub text: String,
    /// Offset from the parent container's top-left corner.
    pub left: f64,
    pub top: f64,
    pub editable: bool,
    pub drag: DragState,
}

impl NoteElement {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            text: note.content.clone(),
            left: note.x,
            top: note.y,
            editable: false,
            drag: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// The persisted form of this element while it sits in `quadrant`.
    pub fn to_note(&self, quadrant: &str) -> Note {
        Note {
            id: self.id.clone(),
            content: self.text.clone(),
            x: self.left,
            y: self.top,
            quadrant: quadrant.to_string(),
        }
    }
}

/// Bounding box of a note whose top-left corner sits at `origin`.
/// Edges are inclusive, so the box covers exactly `NOTE_WIDTH` x `NOTE_HEIGHT` cells.
pub fn note_bounds(origin: Point) -> Rect {
    Rect::from_origin_size(origin, NOTE_WIDTH - 1.0, NOTE_HEIGHT - 1.0)
}

#[derive(Debug, Clone)]
pub struct Container {
    id: String,
    bounds: Rect,
    children: Vec<NoteElement>,
}

impl Container {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Children in paint order; the last one is drawn on top.
    pub fn children(&self) -> &[NoteElement] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
pub struct Surface {
    containers: Vec<Container>,
    focused: Option<String>,
    active_drag: Option<String>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface with one empty container per quadrant, in board order.
    /// Bounds start empty until the first layout pass.
    pub fn with_quadrants() -> Self {
        let mut surface = Self::new();
        for q in Quadrant::ALL {
            surface.add_container(q.as_str(), Rect::default());
        }
        surface
    }

    pub fn add_container(&mut self, id: &str, bounds: Rect) {
        self.containers.push(Container {
            id: id.to_string(),
            bounds,
            children: Vec::new(),
        });
    }

    /// Returns false if no container has this id.
    pub fn set_bounds(&mut self, id: &str, bounds: Rect) -> bool {
        match self.containers.iter_mut().find(|c| c.id == id) {
            Some(container) => {
                container.bounds = bounds;
                true
            }
            None => false,
        }
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// Append `element` as the last child of `container_id`.
    ///
    /// If an element with the same id is already on the surface it is
    /// detached first, so an element never has two parents.
    pub fn append_child(
        &mut self,
        container_id: &str,
        element: NoteElement,
    ) -> Result<(), SurfaceError> {
        if self.container(container_id).is_none() {
            return Err(SurfaceError::MissingContainer(container_id.to_string()));
        }
        self.detach(&element.id);
        if let Some(container) = self.containers.iter_mut().find(|c| c.id == container_id) {
            container.children.push(element);
        }
        Ok(())
    }

    /// Move an existing element under `container_id`, keeping its on-screen
    /// position by rebasing `left`/`top` onto the new container's origin.
    pub fn reparent(&mut self, element_id: &str, container_id: &str) -> Result<(), SurfaceError> {
        let new_origin = self
            .container(container_id)
            .map(|c| c.bounds.origin())
            .ok_or_else(|| SurfaceError::MissingContainer(container_id.to_string()))?;
        let screen = self
            .element_origin(element_id)
            .ok_or_else(|| SurfaceError::MissingElement(element_id.to_string()))?;
        let mut element = self
            .detach(element_id)
            .ok_or_else(|| SurfaceError::MissingElement(element_id.to_string()))?;
        let rel = screen.offset_from(new_origin);
        element.left = rel.x;
        element.top = rel.y;
        self.append_child(container_id, element)
    }

    fn detach(&mut self, element_id: &str) -> Option<NoteElement> {
        for container in &mut self.containers {
            if let Some(idx) = container.children.iter().position(|e| e.id == element_id) {
                return Some(container.children.remove(idx));
            }
        }
        None
    }

    pub fn find(&self, element_id: &str) -> Option<&NoteElement> {
        self.containers
            .iter()
            .flat_map(|c| c.children.iter())
            .find(|e| e.id == element_id)
    }

    pub fn find_mut(&mut self, element_id: &str) -> Option<&mut NoteElement> {
        self.containers
            .iter_mut()
            .flat_map(|c| c.children.iter_mut())
            .find(|e| e.id == element_id)
    }

    pub fn parent_of(&self, element_id: &str) -> Option<&str> {
        self.containers
            .iter()
            .find(|c| c.children.iter().any(|e| e.id == element_id))
            .map(|c| c.id.as_str())
    }

    /// Screen position of an element's top-left corner.
    pub fn element_origin(&self, element_id: &str) -> Option<Point> {
        self.containers.iter().find_map(|c| {
            c.children
                .iter()
                .find(|e| e.id == element_id)
                .map(|e| c.bounds.origin().translate(e.left, e.top))
        })
    }

    /// Topmost element under `point`: later containers and later children paint over earlier ones.
    pub fn element_at(&self, point: Point) -> Option<&str> {
        self.containers
            .iter()
            .rev()
            .flat_map(|c| {
                let origin = c.bounds.origin();
                c.children
                    .iter()
                    .rev()
                    .map(move |e| (e, origin.translate(e.left, e.top)))
            })
            .find(|(_, origin)| note_bounds(*origin).contains(point))
            .map(|(e, _)| e.id.as_str())
    }

    /// First container, in board order, whose bounds contain `point`.
    pub fn quadrant_at(&self, point: Point) -> Option<&str> {
        first_containing(
            self.containers.iter().map(|c| (c.id.as_str(), &c.bounds)),
            point,
        )
    }

    pub fn note_count(&self) -> usize {
        self.containers.iter().map(|c| c.children.len()).sum()
    }

    // -- Focus --

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn focus(&mut self, element_id: &str) -> bool {
        if self.find(element_id).is_none() {
            return false;
        }
        self.focused = Some(element_id.to_string());
        true
    }

    /// Clears focus, returning the id that had it.
    pub fn take_focus(&mut self) -> Option<String> {
        self.focused.take()
    }

    // -- Board-wide drag registration --

    /// Element receiving board-wide pointer move/up events, if a drag is underway.
    pub fn active_drag(&self) -> Option<&str> {
        self.active_drag.as_deref()
    }

    pub fn set_active_drag(&mut self, element_id: &str) {
        self.active_drag = Some(element_id.to_string());
    }

    pub fn take_active_drag(&mut self) -> Option<String> {
        self.active_drag.take()
    }
}
