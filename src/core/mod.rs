//! # Core Application Logic
//!
//! The board model and everything that acts on it.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Board (columns/tasks)│
//!                    │  • markdown (file I/O)  │
//!                    │  • App + Action/update  │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`board`]: The `Board` itself: queries, mutations, save
//! - [`markdown`]: Parsing and rendering the board file
//! - [`error`]: `BoardError`
//! - [`state`]: The `App` struct: board plus cursor
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered settings

pub mod action;
pub mod board;
pub mod config;
pub mod error;
pub mod markdown;
pub mod state;

pub use board::{Board, Direction, LoadOptions, TaskCoord};
pub use error::BoardError;
pub use markdown::ParsePolicy;
