//! # Edit Dialog Component
//!
//! Centered overlay with a one-line text field, used both for adding a task
//! (`a`) and renaming the selected one (`e`). Enter confirms, Esc cancels.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `EditDialogState` lives in `TuiState` while the dialog is open
//! - `EditDialog` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// What confirming the dialog will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    NewTask,
    ExistingTask,
}

/// Events emitted by the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    Submit { target: EditTarget, text: String },
    Cancel,
}

/// Persistent state for the edit dialog overlay.
pub struct EditDialogState {
    pub target: EditTarget,
    pub buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    pub cursor: usize,
}

impl EditDialogState {
    pub fn new(target: EditTarget, initial: &str) -> Self {
        Self {
            target,
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }

    fn title(&self) -> &'static str {
        match self.target {
            EditTarget::NewTask => " New Task ",
            EditTarget::ExistingTask => " Edit Task ",
        }
    }

    fn insert_str(&mut self, text: &str) {
        // Tasks are one line; pasted newlines become spaces
        let cleaned: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        self.buffer.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    /// Display column of the cursor within the text.
    pub fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }
}

impl EventHandler for EditDialogState {
    type Event = EditEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<EditEvent> {
        match event {
            TuiEvent::Enter => Some(EditEvent::Submit {
                target: self.target,
                text: self.buffer.clone(),
            }),
            TuiEvent::Escape => Some(EditEvent::Cancel),
            TuiEvent::Char(c) => {
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf));
                None
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                None
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let start = self.prev_boundary();
                    self.buffer.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
                None
            }
            TuiEvent::Left => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::Right => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the edit dialog overlay.
pub struct EditDialog<'a> {
    state: &'a EditDialogState,
}

impl<'a> EditDialog<'a> {
    pub fn new(state: &'a EditDialogState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 3, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(self.state.title())
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Save  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));

        let inner = block.inner(overlay);
        let width = inner.width.max(1);

        // Scroll horizontally so the cursor stays visible
        let cursor_col = self.state.cursor_column();
        let scroll = cursor_col.saturating_sub(width - 1);

        let field = Paragraph::new(self.state.buffer.as_str())
            .scroll((0, scroll))
            .block(block);
        frame.render_widget(field, overlay);

        frame.set_cursor_position(Position::new(
            inner.x + cursor_col - scroll,
            inner.y,
        ));
    }
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(ratatui::layout::Flex::Center)
        .areas(row);
    cell
}
