//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: file name, unsaved marker, status message
//! - `ColumnList`: one board column with its tasks
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `EditDialog`: one-line text field for adding or editing a task
//!
//! Components receive board data as props rather than reaching into `App`,
//! so each one can be rendered against a `TestBackend` in isolation.

pub mod column_list;
pub mod edit_dialog;
mod title_bar;

pub use column_list::ColumnList;
pub use edit_dialog::{EditDialog, EditDialogState, EditEvent, EditTarget};
pub use title_bar::TitleBar;
