use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use quadboard_core::Point;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::board::Board;
use crate::components::quadrant_grid;
use crate::persist::Persister;

/// Two presses on the same cell within this window count as a double-click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

const APP_TITLE: &str = " quadboard ";
const ADD_BUTTON: &str = "[+ New Task]";

/// What the app is currently doing
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Board idle, waiting for a gesture
    Normal,
    /// A note follows the pointer
    Dragging { note_id: String },
    /// Keystrokes go into a note's text
    Editing { note_id: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AppLayout {
    pub title: Rect,
    pub add_button: Rect,
    pub board: Rect,
    pub status: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);
        let title = chunks[0];
        let button_x = title.x.saturating_add(APP_TITLE.len() as u16 + 1);
        let add_button = Rect::new(button_x, title.y, ADD_BUTTON.len() as u16, title.height)
            .intersection(title);
        Self {
            title,
            add_button,
            board: chunks[1],
            status: chunks[2],
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Click {
    cell: (u16, u16),
    at: Instant,
}

pub struct App {
    board: Board,
    layout: AppLayout,
    last_click: Option<Click>,
}

impl App {
    /// Build the app and load the board. A failed load leaves the board empty.
    pub fn new(persister: Persister) -> Self {
        let mut board = Board::new(persister);
        board.load_notes();
        Self {
            board,
            layout: AppLayout::default(),
            last_click: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn layout(&self) -> AppLayout {
        self.layout
    }

    pub fn mode(&self) -> Mode {
        if let Some(id) = self.board.surface().active_drag() {
            return Mode::Dragging {
                note_id: id.to_string(),
            };
        }
        match self.board.editing() {
            Some(id) => Mode::Editing {
                note_id: id.to_string(),
            },
            None => Mode::Normal,
        }
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode(), Mode::Editing { .. })
    }

    /// Recompute layout for the terminal area and push quadrant bounds to the board.
    pub fn resize(&mut self, area: Rect) {
        let layout = AppLayout::new(area);
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        let bounds: Vec<_> = quadrant_grid::grid_areas(layout.board)
            .into_iter()
            .map(|(q, r)| (q, quadrant_grid::to_board_rect(r)))
            .collect();
        self.board.set_layout(&bounds);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.board.editing().is_some() {
            match key.code {
                KeyCode::Char(c) => self.board.type_char(c),
                KeyCode::Backspace => self.board.backspace(),
                KeyCode::Enter | KeyCode::Esc => {
                    self.board.blur();
                }
                _ => {}
            }
            return;
        }

        if let KeyCode::Char('n') = key.code {
            self.board.create_note();
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.handle_mouse_at(mouse, Instant::now());
    }

    /// Mouse handling with an explicit clock, for double-click timing.
    pub fn handle_mouse_at(&mut self, mouse: MouseEvent, now: Instant) {
        let cell = (mouse.column, mouse.row);
        let point = Point::new(f64::from(mouse.column), f64::from(mouse.row));

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let clicked_away = self
                    .board
                    .editing()
                    .is_some_and(|id| self.board.surface().element_at(point) != Some(id));
                if clicked_away {
                    self.board.blur();
                }

                if self.layout.add_button.contains(Position::new(cell.0, cell.1)) {
                    self.last_click = None;
                    self.board.create_note();
                    return;
                }

                let is_double = self.last_click.is_some_and(|c| {
                    c.cell == cell && now.saturating_duration_since(c.at) <= DOUBLE_CLICK_WINDOW
                });
                if is_double {
                    self.last_click = None;
                    self.board.double_click(point);
                    return;
                }

                self.last_click = Some(Click { cell, at: now });
                self.board.pointer_down(point);
            }
            MouseEventKind::Drag(MouseButton::Left) => self.board.pointer_move(point),
            MouseEventKind::Up(MouseButton::Left) => {
                self.board.pointer_up();
            }
            MouseEventKind::Moved => self.board.hover(point),
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        self.render_title_bar(frame);
        quadrant_grid::render(frame, self.board.surface(), self.layout.board);
        self.render_status_bar(frame);
    }

    fn render_title_bar(&self, frame: &mut Frame) {
        let line = Line::from(vec![
            Span::styled(APP_TITLE, Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
            Span::raw(" "),
            Span::styled(ADD_BUTTON, Style::default().fg(Color::Green).bold()),
            Span::styled(
                format!("  {} notes", self.board.surface().note_count()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), self.layout.title);
    }

    fn render_status_bar(&self, frame: &mut Frame) {
        let help = match self.mode() {
            Mode::Normal => "n = new note  drag = move  double-click = edit  q = quit",
            Mode::Dragging { .. } => "release to drop the note into a quadrant",
            Mode::Editing { .. } => "type to edit  Backspace = delete  Enter/Esc = done",
        };
        let paragraph =
            Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray)));
        frame.render_widget(paragraph, self.layout.status);
    }
}
