//! # Application State
//!
//! Session state around the board. No TUI-specific types here;
//! presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── board: Board              // columns + tasks, owns the file path
//! ├── cursor: Cursor            // focused column, selected task
//! ├── status_message: String    // status bar text
//! └── dirty: bool               // unsaved changes since load/save
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::board::{Board, TaskCoord};

/// Where the user is looking. `task` is `None` when the focused column is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub column: usize,
    pub task: Option<usize>,
}

impl Cursor {
    pub fn selected(&self) -> Option<TaskCoord> {
        self.task.map(|task| TaskCoord::new(self.column, task))
    }

    /// Pulls the cursor back inside the board after a structural change.
    pub fn clamp_to(&mut self, board: &Board) {
        let column_count = board.column_count();
        if self.column >= column_count {
            self.column = column_count.saturating_sub(1);
        }
        let len = board.task_count(self.column).unwrap_or(0);
        self.task = match (self.task, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
    }
}

pub struct App {
    pub board: Board,
    pub cursor: Cursor,
    pub status_message: String,
    pub dirty: bool,
}

impl App {
    pub fn new(board: Board) -> Self {
        let mut cursor = Cursor::default();
        cursor.clamp_to(&board);
        let status_message = format!("Editing {}", board.path().display());
        Self {
            board,
            cursor,
            status_message,
            dirty: false,
        }
    }

    /// Text of the selected task, if any.
    pub fn selected_text(&self) -> Option<&str> {
        self.cursor
            .selected()
            .and_then(|coord| self.board.task(coord).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{board_from, test_app};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.cursor, Cursor { column: 0, task: Some(0) });
        assert!(!app.dirty);
        assert!(app.status_message.contains(".board.md"));
        assert_eq!(app.selected_text(), Some("buy milk"));
    }

    #[test]
    fn test_app_new_on_empty_first_column() {
        let app = App::new(board_from("# Todo\n# Done\n- x\n"));
        assert_eq!(app.cursor.task, None);
        assert_eq!(app.cursor.selected(), None);
        assert_eq!(app.selected_text(), None);
    }

    #[test]
    fn test_clamp_pulls_task_index_back() {
        let board = board_from("# A\n- one\n- two\n# B\n");
        let mut cursor = Cursor { column: 0, task: Some(5) };
        cursor.clamp_to(&board);
        assert_eq!(cursor.task, Some(1));

        let mut cursor = Cursor { column: 1, task: Some(0) };
        cursor.clamp_to(&board);
        assert_eq!(cursor.task, None);

        let mut cursor = Cursor { column: 9, task: None };
        cursor.clamp_to(&board);
        assert_eq!(cursor, Cursor { column: 1, task: None });
    }
}
