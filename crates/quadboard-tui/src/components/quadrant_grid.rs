use quadboard_core::Quadrant;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::surface::{NoteElement, Surface, NOTE_HEIGHT, NOTE_WIDTH};

/// Split the board area into the 2x2 quadrant grid, in board order.
pub fn grid_areas(area: Rect) -> [(Quadrant, Rect); 4] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);
    let split_row = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(row)
    };
    let top = split_row(rows[0]);
    let bottom = split_row(rows[1]);
    [
        (Quadrant::UrgentImportant, top[0]),
        (Quadrant::NotUrgentImportant, top[1]),
        (Quadrant::UrgentNotImportant, bottom[0]),
        (Quadrant::NotUrgentNotImportant, bottom[1]),
    ]
}

/// Screen cells covered by a layout area, as inclusive board coordinates.
pub fn to_board_rect(area: Rect) -> quadboard_core::Rect {
    let left = f64::from(area.x);
    let top = f64::from(area.y);
    quadboard_core::Rect::new(
        left,
        top,
        left + f64::from(area.width) - 1.0,
        top + f64::from(area.height) - 1.0,
    )
}

fn to_area(rect: quadboard_core::Rect) -> Rect {
    let width = (rect.width() + 1.0).max(0.0);
    let height = (rect.height() + 1.0).max(0.0);
    Rect::new(
        rect.left.max(0.0) as u16,
        rect.top.max(0.0) as u16,
        width as u16,
        height as u16,
    )
}

/// Draw every quadrant and its notes. Notes are clipped to `clip`,
/// so a note dragged across a border stays visible.
pub fn render(frame: &mut Frame, surface: &Surface, clip: Rect) {
    for container in surface.containers() {
        render_container(frame, container.id(), container.children().len(), to_area(container.bounds()));
    }

    let mut dragged = None;
    for container in surface.containers() {
        let origin = container.bounds().origin();
        for element in container.children() {
            let at = (origin.x + element.left, origin.y + element.top);
            if element.is_dragging() {
                dragged = Some((element, at));
                continue;
            }
            render_note(frame, element, at, clip, surface.focused() == Some(element.id.as_str()));
        }
    }
    // The note under the pointer paints over everything else.
    if let Some((element, at)) = dragged {
        render_note(frame, element, at, clip, false);
    }
}

fn render_container(frame: &mut Frame, id: &str, count: usize, area: Rect) {
    if area.is_empty() {
        return;
    }
    let quadrant = Quadrant::from_str(id);
    let name = quadrant.map(|q| q.display_name()).unwrap_or(id);
    let block = Block::default()
        .title(format!(" {name} ({count}) "))
        .borders(Borders::ALL)
        .border_style(quadrant_style(quadrant));
    frame.render_widget(block, area);
}

fn render_note(frame: &mut Frame, element: &NoteElement, at: (f64, f64), clip: Rect, focused: bool) {
    let Some(area) = note_area(at, clip) else {
        return;
    };

    let border_style = if element.editable {
        Style::default().fg(Color::Yellow).bold()
    } else if element.is_dragging() {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    if element.editable && focused {
        block = block.title(" editing ");
    }

    let mut text = element.text.clone();
    if element.editable {
        text.push('_');
    }
    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(Color::Black).bg(Color::LightYellow))
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Note rectangle at screen position `at`, clipped to `clip`. `None` when fully outside.
///
/// Edges are clamped in floating point so positions far off screen never
/// reach integer arithmetic.
pub fn note_area(at: (f64, f64), clip: Rect) -> Option<Rect> {
    let (x0, x1) = clip_span(at.0, NOTE_WIDTH, clip.x, clip.right())?;
    let (y0, y1) = clip_span(at.1, NOTE_HEIGHT, clip.y, clip.bottom())?;
    Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
}

fn clip_span(start: f64, len: f64, lo: u16, hi: u16) -> Option<(u16, u16)> {
    let start = start.round();
    let end = (start + len).min(f64::from(hi));
    let start = start.max(f64::from(lo));
    if end <= start {
        return None;
    }
    Some((start as u16, end as u16))
}

fn quadrant_style(quadrant: Option<Quadrant>) -> Style {
    match quadrant {
        Some(Quadrant::UrgentImportant) => Style::default().fg(Color::Red),
        Some(Quadrant::NotUrgentImportant) => Style::default().fg(Color::Green),
        Some(Quadrant::UrgentNotImportant) => Style::default().fg(Color::Yellow),
        Some(Quadrant::NotUrgentNotImportant) => Style::default().fg(Color::Blue),
        None => Style::default().fg(Color::DarkGray),
    }
}
