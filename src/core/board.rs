//! # Board
//!
//! The kanban model: an ordered list of named columns, each holding an
//! ordered list of single-line tasks, backed by one markdown file.
//!
//! ```text
//! Board
//! ├── path: PathBuf           // where save() writes
//! └── columns: Vec<Column>    // fixed at load time, never added/removed
//!     ├── name: String
//!     └── tasks: Vec<String>  // order matters, identity is positional
//! ```
//!
//! Tasks are addressed with a [`TaskCoord`]. Coordinates are plain values,
//! so any structural change (add, move) can leave a held one pointing at a
//! different task. Callers re-derive them after mutating.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::core::error::{BoardError, Result};
use crate::core::markdown::{self, ParsePolicy};

/// Columns created when the board file does not exist yet.
pub const DEFAULT_COLUMNS: [&str; 3] = ["Todo", "In Progress", "Done"];

/// Position of a task: column index, then index within that column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCoord {
    pub column: usize,
    pub task: usize,
}

impl TaskCoord {
    pub fn new(column: usize, task: usize) -> Self {
        Self { column, task }
    }
}

/// Which neighbouring column a task moves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward index 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// `+1` is `Right`, `-1` is `Left`. Anything else is not a neighbour.
    pub fn from_offset(offset: i32) -> Option<Self> {
        match offset {
            1 => Some(Direction::Right),
            -1 => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn offset(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// The neighbour of `column`, if there is one below `column_count`.
    fn target(self, column: usize, column_count: usize) -> Option<usize> {
        match self {
            Direction::Left => column.checked_sub(1),
            Direction::Right => Some(column + 1).filter(|&c| c < column_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    tasks: Vec<String>,
}

impl Column {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, task: String) {
        self.tasks.push(task);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }
}

/// Options for [`Board::load`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub policy: ParsePolicy,
    /// Column names used when the file does not exist. Must not be empty.
    pub default_columns: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            policy: ParsePolicy::default(),
            default_columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Task and column text is a single trimmed line; line breaks become spaces.
pub fn normalize_text(text: &str) -> String {
    text.split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone)]
pub struct Board {
    path: PathBuf,
    columns: Vec<Column>,
}

impl Board {
    /// Loads the board at `path`, or starts a fresh one with
    /// `options.default_columns` if the file does not exist.
    pub fn load(path: impl Into<PathBuf>, options: &LoadOptions) -> Result<Self> {
        let path = path.into();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let columns = default_columns(&options.default_columns);
                info!(
                    "No board at {}, starting with {} empty columns",
                    path.display(),
                    columns.len()
                );
                return Ok(Self { path, columns });
            }
            Err(e) => return Err(e.into()),
        };
        let board = Self::from_markdown(path, &content, options.policy)?;
        info!(
            "Loaded board from {} ({} columns, {} tasks)",
            board.path.display(),
            board.columns.len(),
            board.columns.iter().map(|c| c.tasks.len()).sum::<usize>()
        );
        Ok(board)
    }

    /// Builds a board from markdown that has already been read.
    pub fn from_markdown(
        path: impl Into<PathBuf>,
        content: &str,
        policy: ParsePolicy,
    ) -> Result<Self> {
        let columns = markdown::parse(content, policy)?;
        Ok(Self {
            path: path.into(),
            columns,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Column names in workflow order.
    pub fn columns(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Task texts per column; outer index is the column index.
    pub fn tasks(&self) -> Vec<Vec<&str>> {
        self.columns
            .iter()
            .map(|c| c.tasks.iter().map(String::as_str).collect())
            .collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn task_count(&self, column: usize) -> Result<usize> {
        Ok(self.column(column)?.tasks.len())
    }

    pub fn task(&self, coord: TaskCoord) -> Result<&str> {
        self.column(coord.column)?
            .tasks
            .get(coord.task)
            .map(String::as_str)
            .ok_or(BoardError::CoordinateOutOfRange {
                column: coord.column,
                task: Some(coord.task),
            })
    }

    fn column(&self, column: usize) -> Result<&Column> {
        self.columns
            .get(column)
            .ok_or(BoardError::CoordinateOutOfRange { column, task: None })
    }

    fn column_mut(&mut self, column: usize) -> Result<&mut Column> {
        self.columns
            .get_mut(column)
            .ok_or(BoardError::CoordinateOutOfRange { column, task: None })
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Appends a task to the end of `column` and returns where it landed.
    pub fn add_task(&mut self, column: usize, text: &str) -> Result<TaskCoord> {
        let target = self.column_mut(column)?;
        target.tasks.push(normalize_text(text));
        let coord = TaskCoord::new(column, target.tasks.len() - 1);
        debug!("Added task at {:?}", coord);
        Ok(coord)
    }

    /// Replaces the text of an existing task without moving it.
    pub fn update_task(&mut self, coord: TaskCoord, text: &str) -> Result<()> {
        let slot = self
            .column_mut(coord.column)?
            .tasks
            .get_mut(coord.task)
            .ok_or(BoardError::CoordinateOutOfRange {
                column: coord.column,
                task: Some(coord.task),
            })?;
        *slot = normalize_text(text);
        debug!("Updated task at {:?}", coord);
        Ok(())
    }

    /// Moves a task to the neighbouring column, appending it at the end.
    ///
    /// Returns `false` and changes nothing when there is no neighbour in that
    /// direction or `coord` does not name a task.
    pub fn move_task(&mut self, coord: TaskCoord, direction: Direction) -> bool {
        let Some(target) = direction.target(coord.column, self.columns.len()) else {
            return false;
        };
        if self.task(coord).is_err() {
            return false;
        }

        let task = self.columns[coord.column].tasks.remove(coord.task);
        self.columns[target].tasks.push(task);
        debug!(
            "Moved task {:?} {:?} to column {} (now index {})",
            coord,
            direction,
            target,
            self.columns[target].tasks.len() - 1
        );
        true
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    pub fn to_markdown(&self) -> String {
        markdown::render(&self.columns)
    }

    /// Writes the board to its path via a `.tmp` sibling and `rename()`,
    /// so a failed write never truncates the existing file.
    ///
    /// A symlinked board file is written through: the `.tmp` file sits next
    /// to the link's target and replaces the target, leaving the link intact.
    pub fn save(&self) -> Result<()> {
        let target = self.write_target()?;
        let mut tmp_name = target.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let written =
            fs::write(&tmp_path, self.to_markdown()).and_then(|()| fs::rename(&tmp_path, &target));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        if target != self.path {
            debug!("{} resolves to {}", self.path.display(), target.display());
        }
        info!("Saved board to {}", self.path.display());
        Ok(())
    }

    /// The file `save()` replaces: the board path with symlinks resolved,
    /// or the path itself when nothing exists there yet.
    fn write_target(&self) -> Result<PathBuf> {
        match fs::canonicalize(&self.path) {
            Ok(resolved) => Ok(resolved),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(self.path.clone()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Columns for a board that has no file yet. Blank names are skipped; if
/// none remain the built-in `DEFAULT_COLUMNS` are used.
fn default_columns(names: &[String]) -> Vec<Column> {
    let columns: Vec<Column> = names
        .iter()
        .map(|n| normalize_text(n))
        .filter(|n| !n.is_empty())
        .map(Column::new)
        .collect();
    if columns.is_empty() {
        return DEFAULT_COLUMNS.iter().map(|n| Column::new(*n)).collect();
    }
    columns
}
