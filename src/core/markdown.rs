//! # Board Markdown
//!
//! The on-disk format is a tiny markdown subset:
//!
//! ```text
//! # Todo
//! - write the parser
//! - write the serializer
//! # Done
//! ```
//!
//! `# ` starts a column, `- ` (or `* `) adds a task to the column above it.
//! Lines are trimmed before matching. Blank lines are always ignored; what
//! happens to any other line depends on the [`ParsePolicy`].

use serde::{Deserialize, Serialize};

use crate::core::board::Column;
use crate::core::error::{BoardError, Result};

const HEADING_SIGIL: char = '#';
const TASK_SIGILS: [char; 2] = ['-', '*'];

/// What to do with a non-blank line that is neither a heading nor a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Skip it. Lets people keep notes or sub-headings in the file.
    #[default]
    Lenient,
    /// Reject the whole file.
    Strict,
}

enum Line<'a> {
    Blank,
    Heading(&'a str),
    Task(&'a str),
    Other,
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(rest) = strip_marker(line, HEADING_SIGIL) {
        return Line::Heading(rest);
    }
    for sigil in TASK_SIGILS {
        if let Some(rest) = strip_marker(line, sigil) {
            return Line::Task(rest);
        }
    }
    Line::Other
}

/// Strips `sigil` when it stands alone or is followed by whitespace, so
/// `## notes` and `-5 degrees` are not mistaken for markers.
fn strip_marker(line: &str, sigil: char) -> Option<&str> {
    let rest = line.strip_prefix(sigil)?;
    if rest.is_empty() {
        Some(rest)
    } else if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Parses board markdown into columns.
///
/// Fails when a task appears before the first heading, a heading has no name,
/// the document has no headings at all, or (under [`ParsePolicy::Strict`]) a
/// line matches neither marker.
pub fn parse(content: &str, policy: ParsePolicy) -> Result<Vec<Column>> {
    let mut columns: Vec<Column> = Vec::new();
    // Editors on Windows may prepend a byte-order mark
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(content);

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        match classify(raw) {
            Line::Blank => {}
            Line::Heading(name) => {
                if name.is_empty() {
                    return Err(BoardError::format_at(line_no, "column heading has no name"));
                }
                columns.push(Column::new(name));
            }
            Line::Task(text) => match columns.last_mut() {
                Some(column) => column.push(text.to_string()),
                None => {
                    return Err(BoardError::format_at(
                        line_no,
                        "task appears before any column heading",
                    ));
                }
            },
            Line::Other => {
                if policy == ParsePolicy::Strict {
                    return Err(BoardError::format_at(
                        line_no,
                        format!("expected a '# ' heading or '- ' task, found {:?}", raw.trim()),
                    ));
                }
            }
        }
    }

    if columns.is_empty() {
        return Err(BoardError::FileFormat {
            line: None,
            reason: "no column headings found".to_string(),
        });
    }
    Ok(columns)
}

/// Renders columns back to markdown. Always newline-terminated.
pub fn render(columns: &[Column]) -> String {
    let mut out = String::new();
    for column in columns {
        out.push_str("# ");
        out.push_str(column.name());
        out.push('\n');
        for task in column.tasks() {
            if task.is_empty() {
                out.push_str("-\n");
            } else {
                out.push_str("- ");
                out.push_str(task);
                out.push('\n');
            }
        }
    }
    out
}
