//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::board::Board;
use crate::core::markdown::ParsePolicy;
use crate::core::state::App;

pub const SAMPLE_MARKDOWN: &str = "\
# Todo
- buy milk
- write tests
# In Progress
- refactor parser
# Done
- ship v0.1
";

/// Parses `markdown` leniently into a board that would save to `.board.md`.
pub fn board_from(markdown: &str) -> Board {
    Board::from_markdown(".board.md", markdown, ParsePolicy::Lenient).unwrap()
}

/// Three columns, tasks in every column.
pub fn sample_board() -> Board {
    board_from(SAMPLE_MARKDOWN)
}

/// Creates a test App around [`sample_board`].
pub fn test_app() -> App {
    App::new(sample_board())
}
