//! # Actions
//!
//! Everything the user can do to the board becomes an `Action`.
//! Pressing `L`? That's `Action::MoveTask(Direction::Right)`.
//! Confirming the edit dialog? That's `Action::EditTask(text)`.
//!
//! `update()` applies an action to the `App` and returns an `Effect` for the
//! caller to carry out. No I/O happens here, saving included.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, warn};

use crate::core::board::Direction;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FocusNext,
    FocusPrev,
    CursorUp,
    CursorDown,
    MoveTask(Direction),
    /// Append a task to the focused column.
    AddTask(String),
    /// Replace the text of the selected task.
    EditTask(String),
    Save,
    /// Save, then quit.
    Quit,
    /// Quit without saving.
    Abandon,
}

/// Side effects `update()` asks the event loop to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Save,
    SaveAndQuit,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    match action {
        Action::FocusNext | Action::FocusPrev => {
            let count = app.board.column_count();
            app.cursor.column = if action == Action::FocusNext {
                (app.cursor.column + 1) % count
            } else {
                (app.cursor.column + count - 1) % count
            };
            app.cursor.clamp_to(&app.board);
            Effect::None
        }
        Action::CursorUp => {
            if let Some(task) = app.cursor.task {
                app.cursor.task = Some(task.saturating_sub(1));
            }
            Effect::None
        }
        Action::CursorDown => {
            if let Some(task) = app.cursor.task {
                app.cursor.task = Some(task + 1);
                app.cursor.clamp_to(&app.board);
            }
            Effect::None
        }
        Action::MoveTask(direction) => {
            let Some(coord) = app.cursor.selected() else {
                app.status_message = "Nothing to move".to_string();
                return Effect::None;
            };
            if app.board.move_task(coord, direction) {
                // Follow the task: it is now last in the neighbouring column.
                app.cursor.column = match direction {
                    Direction::Left => coord.column - 1,
                    Direction::Right => coord.column + 1,
                };
                app.cursor.task = app
                    .board
                    .task_count(app.cursor.column)
                    .ok()
                    .and_then(|len| len.checked_sub(1));
                app.dirty = true;
                app.status_message = format!(
                    "Moved to {}",
                    app.board.columns()[app.cursor.column]
                );
            } else {
                app.status_message = match direction {
                    Direction::Left => "Already in the first column".to_string(),
                    Direction::Right => "Already in the last column".to_string(),
                };
            }
            Effect::None
        }
        Action::AddTask(text) => {
            match app.board.add_task(app.cursor.column, &text) {
                Ok(coord) => {
                    app.cursor.task = Some(coord.task);
                    app.dirty = true;
                    app.status_message = "Task added".to_string();
                }
                Err(e) => {
                    warn!("Add task failed: {}", e);
                    app.status_message = format!("Add failed: {}", e);
                }
            }
            Effect::None
        }
        Action::EditTask(text) => {
            let Some(coord) = app.cursor.selected() else {
                app.status_message = "Nothing to edit".to_string();
                return Effect::None;
            };
            match app.board.update_task(coord, &text) {
                Ok(()) => {
                    app.dirty = true;
                    app.status_message = "Task updated".to_string();
                }
                Err(e) => {
                    warn!("Edit task failed: {}", e);
                    app.status_message = format!("Edit failed: {}", e);
                }
            }
            Effect::None
        }
        Action::Save => Effect::Save,
        Action::Quit => Effect::SaveAndQuit,
        Action::Abandon => Effect::Quit,
    }
}
