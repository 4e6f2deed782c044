//! # TitleBar Component
//!
//! Top status bar: which file is open, whether it has unsaved changes, and
//! the latest status message.
//!
//! Purely presentational. All data comes in as props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(
//!     app.board.path().display().to_string(),
//!     app.status_message.clone(),
//!     app.dirty,
//! );
//! title_bar.render(frame, title_area);
//! ```
//!
//! Formatting:
//!
//! 1. **Dirty + status**: `"markban: .board.md [+] | Task added"`
//! 2. **Status**: `"markban: .board.md | Saved"`
//! 3. **Default**: `"markban: .board.md"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

pub struct TitleBar {
    /// Board file as shown to the user
    pub file_name: String,
    /// Status message (e.g., "Task added", "Already in the last column")
    pub status_message: String,
    /// Unsaved changes since the last load or save
    pub dirty: bool,
}

impl TitleBar {
    pub fn new(file_name: String, status_message: String, dirty: bool) -> Self {
        Self {
            file_name,
            status_message,
            dirty,
        }
    }

    fn text(&self) -> String {
        let marker = if self.dirty { " [+]" } else { "" };
        if self.status_message.is_empty() {
            format!("markban: {}{}", self.file_name, marker)
        } else {
            format!("markban: {}{} | {}", self.file_name, marker, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.text(), Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(span, area);
    }
}
