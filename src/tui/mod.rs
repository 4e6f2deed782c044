//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the board,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm event → TuiEvent → (mode dispatch) → Action → update() → Effect
//! ```
//!
//! In `Normal` mode keys map straight to actions. `a` and `e` open the edit
//! dialog instead; its `Submit` event becomes `AddTask`/`EditTask`.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop blocks up to 500ms waiting for input and
//! only redraws after an event arrives.

mod component;
mod components;
mod event;
mod ui;

use log::{error, info, warn};
use std::io::stdout;
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::board::{Board, Direction};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{EditDialogState, EditEvent, EditTarget};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Edit overlay (None = hidden). While open it receives every key.
    pub edit_dialog: Option<EditDialogState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self { edit_dialog: None }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste)?;
        info!("Terminal modes enabled (bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste);
    }
}

pub fn run(board: Board) -> std::io::Result<()> {
    let mut app = App::new(board);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let result = event_loop(&mut terminal, &mut app, &mut tui);

    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let Some(first_event) = poll_event_timeout(Duration::from_millis(500))? else {
            continue;
        };
        needs_redraw = true;

        // Process first event + drain everything queued before the next draw
        let mut pending = Some(first_event);
        while let Some(event) = pending {
            match handle_event(app, tui, event) {
                Effect::None => {}
                Effect::Save => save_board(app),
                Effect::SaveAndQuit => {
                    save_board(app);
                    // Stay open if the save failed so the changes aren't lost
                    if !app.dirty {
                        return Ok(());
                    }
                }
                Effect::Quit => {
                    if app.dirty {
                        warn!("Quitting with unsaved changes");
                    }
                    return Ok(());
                }
            }
            pending = poll_event_immediate()?;
        }
    }
}

/// Routes one event to the dialog or to the board, depending on mode.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    if event == TuiEvent::ForceQuit {
        return update(app, Action::Abandon);
    }

    // When the edit dialog is open, route all events to it
    if let Some(dialog) = tui.edit_dialog.as_mut() {
        return match dialog.handle_event(&event) {
            Some(EditEvent::Submit { target, text }) => {
                tui.edit_dialog = None;
                let action = match target {
                    EditTarget::NewTask => Action::AddTask(text),
                    EditTarget::ExistingTask => Action::EditTask(text),
                };
                update(app, action)
            }
            Some(EditEvent::Cancel) => {
                tui.edit_dialog = None;
                Effect::None
            }
            None => Effect::None,
        };
    }

    match event {
        TuiEvent::Char('a') => {
            tui.edit_dialog = Some(EditDialogState::new(EditTarget::NewTask, ""));
            Effect::None
        }
        TuiEvent::Char('e') | TuiEvent::Enter => {
            match app.selected_text().map(str::to_string) {
                Some(text) => {
                    tui.edit_dialog = Some(EditDialogState::new(EditTarget::ExistingTask, &text));
                }
                None => app.status_message = "Nothing to edit".to_string(),
            }
            Effect::None
        }
        other => match normal_mode_action(&other) {
            Some(action) => update(app, action),
            None => Effect::None,
        },
    }
}

fn normal_mode_action(event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Char('h') | TuiEvent::Left => Some(Action::FocusPrev),
        TuiEvent::Char('l') | TuiEvent::Right => Some(Action::FocusNext),
        TuiEvent::Char('k') | TuiEvent::Up => Some(Action::CursorUp),
        TuiEvent::Char('j') | TuiEvent::Down => Some(Action::CursorDown),
        TuiEvent::Char('H') => Some(Action::MoveTask(Direction::Left)),
        TuiEvent::Char('L') => Some(Action::MoveTask(Direction::Right)),
        TuiEvent::Char('w') => Some(Action::Save),
        TuiEvent::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn save_board(app: &mut App) {
    match app.board.save() {
        Ok(()) => {
            app.dirty = false;
            app.status_message = format!("Saved {}", app.board.path().display());
        }
        Err(e) => {
            error!("Failed to save {}: {}", app.board.path().display(), e);
            app.status_message = format!("Save failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Cursor;
    use crate::test_support::test_app;

    fn press(app: &mut App, tui: &mut TuiState, keys: &str) -> Effect {
        let mut last = Effect::None;
        for c in keys.chars() {
            last = handle_event(app, tui, TuiEvent::Char(c));
        }
        last
    }

    #[test]
    fn test_shift_l_moves_task_right() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        press(&mut app, &mut tui, "L");

        assert_eq!(app.board.tasks()[0], vec!["write tests"]);
        assert_eq!(app.cursor, Cursor { column: 1, task: Some(1) });
    }

    #[test]
    fn test_add_task_through_dialog() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        press(&mut app, &mut tui, "la");
        assert!(tui.edit_dialog.is_some());
        // Keys go to the dialog, not the board, while it is open
        press(&mut app, &mut tui, "lq");
        handle_event(&mut app, &mut tui, TuiEvent::Enter);

        assert!(tui.edit_dialog.is_none());
        assert_eq!(app.board.tasks()[1], vec!["refactor parser", "lq"]);
        assert_eq!(app.cursor, Cursor { column: 1, task: Some(1) });
    }

    #[test]
    fn test_edit_task_prefills_and_updates() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        press(&mut app, &mut tui, "e");
        assert_eq!(
            tui.edit_dialog.as_ref().map(|d| d.buffer.as_str()),
            Some("buy milk")
        );
        press(&mut app, &mut tui, " and eggs");
        handle_event(&mut app, &mut tui, TuiEvent::Enter);

        assert_eq!(app.board.tasks()[0][0], "buy milk and eggs");
    }

    #[test]
    fn test_escape_cancels_dialog_without_changes() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let before = app.board.to_markdown();

        press(&mut app, &mut tui, "axyz");
        handle_event(&mut app, &mut tui, TuiEvent::Escape);

        assert!(tui.edit_dialog.is_none());
        assert_eq!(app.board.to_markdown(), before);
        assert!(!app.dirty);
    }

    #[test]
    fn test_edit_on_empty_column_does_not_open_dialog() {
        let mut app = crate::core::state::App::new(crate::test_support::board_from("# Todo\n"));
        let mut tui = TuiState::new();

        press(&mut app, &mut tui, "e");

        assert!(tui.edit_dialog.is_none());
        assert_eq!(app.status_message, "Nothing to edit");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(press(&mut app, &mut tui, "q"), Effect::SaveAndQuit);
        assert_eq!(press(&mut app, &mut tui, "w"), Effect::Save);
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::ForceQuit),
            Effect::Quit
        );
    }

    #[test]
    fn test_force_quit_works_inside_dialog() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        press(&mut app, &mut tui, "a");
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::ForceQuit),
            Effect::Quit
        );
    }

    #[test]
    fn test_save_board_clears_dirty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.md");
        let board = Board::load(&path, &Default::default()).unwrap();
        let mut app = App::new(board);
        let mut tui = TuiState::new();

        press(&mut app, &mut tui, "a");
        press(&mut app, &mut tui, "task");
        handle_event(&mut app, &mut tui, TuiEvent::Enter);
        assert!(app.dirty);

        save_board(&mut app);

        assert!(!app.dirty);
        assert!(app.status_message.starts_with("Saved"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "# Todo\n- task\n# In Progress\n# Done\n"
        );
    }
}
