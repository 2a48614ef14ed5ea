//! Per-note drag and edit behaviour.
//!
//! Each `NoteElement` carries its own `DragState`; the surface only records
//! which element (if any) receives board-wide move/up events for the gesture
//! in progress. That registration is set on pointer-down and cleared on
//! pointer-up, so it never outlives a single drag.

use quadboard_core::{Note, Point};
use tracing::{debug, error};

use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// `offset` is the pointer position relative to the element's top-left corner at grab time.
    Dragging { offset: Point },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Pointer pressed over `element_id`. Returns true if a drag started.
///
/// Elements in edit mode swallow the press so the cursor can be placed in their text.
pub fn pointer_down(surface: &mut Surface, element_id: &str, pointer: Point) -> bool {
    cancel(surface);
    let Some(origin) = surface.element_origin(element_id) else {
        return false;
    };
    let Some(element) = surface.find_mut(element_id) else {
        return false;
    };
    if element.editable {
        return false;
    }
    element.drag = DragState::Dragging {
        offset: pointer.offset_from(origin),
    };
    surface.set_active_drag(element_id);
    debug!("drag start {element_id} at ({}, {})", pointer.x, pointer.y);
    true
}

/// End an unfinished gesture without persisting anything.
///
/// A release outside the terminal never reaches us, so a new press has to
/// put the previously grabbed element back to `Idle` itself.
pub fn cancel(surface: &mut Surface) -> Option<String> {
    let id = surface.take_active_drag()?;
    if let Some(element) = surface.find_mut(&id) {
        element.drag = DragState::Idle;
    }
    debug!("drag of {id} abandoned");
    Some(id)
}

/// Pointer moved while a drag may be underway.
///
/// The element follows the pointer and is re-parented into whichever
/// quadrant contains the pointer right now. Outside every quadrant it stays
/// in its current container.
pub fn pointer_move(surface: &mut Surface, pointer: Point) {
    let Some(id) = surface.active_drag().map(str::to_string) else {
        return;
    };
    let Some(DragState::Dragging { offset }) = surface.find(&id).map(|e| e.drag) else {
        return;
    };

    let target = surface.quadrant_at(pointer).map(str::to_string);
    if let Some(quadrant) = target {
        if surface.parent_of(&id) != Some(quadrant.as_str()) {
            if let Err(e) = surface.reparent(&id, &quadrant) {
                error!("failed to move note {id} into {quadrant}: {e}");
            }
        }
    }

    let top_left = pointer.translate(-offset.x, -offset.y);
    let Some(parent_origin) = surface
        .parent_of(&id)
        .and_then(|p| surface.container(p))
        .map(|c| c.bounds().origin())
    else {
        return;
    };
    if let Some(element) = surface.find_mut(&id) {
        let rel = top_left.offset_from(parent_origin);
        element.left = rel.x;
        element.top = rel.y;
    }
}

/// Pointer released. Ends the drag and returns the note to persist.
///
/// The final quadrant is the one containing the element's top-left corner.
/// Returns `None` (after logging) when no quadrant contains it; the element
/// then stays in its last container.
pub fn pointer_up(surface: &mut Surface) -> Option<Note> {
    let id = surface.take_active_drag()?;
    let element = surface.find_mut(&id)?;
    if !element.drag.is_dragging() {
        return None;
    }
    element.drag = DragState::Idle;

    let top_left = surface.element_origin(&id)?;
    let Some(quadrant) = surface.quadrant_at(top_left).map(str::to_string) else {
        error!("container for sticky note {id} not found");
        return None;
    };
    if let Err(e) = surface.reparent(&id, &quadrant) {
        error!("failed to settle note {id} into {quadrant}: {e}");
        return None;
    }
    surface.find(&id).map(|e| e.to_note(&quadrant))
}

/// Double-click: put the element in edit mode and give it focus.
pub fn double_click(surface: &mut Surface, element_id: &str) -> bool {
    match surface.find_mut(element_id) {
        Some(element) => {
            element.editable = true;
            surface.focus(element_id)
        }
        None => false,
    }
}

/// Focus left the edited element: it stops being editable.
pub fn blur(surface: &mut Surface) -> Option<String> {
    let id = surface.take_focus()?;
    if let Some(element) = surface.find_mut(&id) {
        element.editable = false;
    }
    Some(id)
}
