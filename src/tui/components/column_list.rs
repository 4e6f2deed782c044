//! # ColumnList Component
//!
//! One board column: a bordered list titled with the column name and task
//! count. The focused column gets a highlighted border and shows the
//! selected task.
//!
//! Built fresh every frame from borrowed board data; the selection comes
//! from `App::cursor`, so there is nothing to keep between frames.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::tui::component::Component;

pub struct ColumnList<'a> {
    pub name: &'a str,
    pub tasks: &'a [&'a str],
    pub focused: bool,
    /// Selected task index; only drawn when focused.
    pub selected: Option<usize>,
}

impl<'a> ColumnList<'a> {
    pub fn new(name: &'a str, tasks: &'a [&'a str], focused: bool, selected: Option<usize>) -> Self {
        Self {
            name,
            tasks,
            focused,
            selected,
        }
    }

    fn title(&self) -> String {
        format!(" {} ({}) ", self.name, self.tasks.len())
    }
}

impl Component for ColumnList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(self.title(), border_style.add_modifier(Modifier::BOLD)));

        let items: Vec<ListItem> = self
            .tasks
            .iter()
            .map(|task| {
                if task.is_empty() {
                    ListItem::new(Line::from(Span::styled(
                        "(empty)",
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                    )))
                } else {
                    ListItem::new(Line::from(*task))
                }
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let mut list_state = ListState::default();
        if self.focused {
            list_state.select(self.selected);
        }
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
