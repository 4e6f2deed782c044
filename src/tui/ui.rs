use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ColumnList, EditDialog, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const KEY_HINTS: &str =
    "h/l column  j/k task  H/L move  a add  e edit  w save  q save+quit  Ctrl+C discard";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, board_area, help_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        app.board.path().display().to_string(),
        app.status_message.clone(),
        app.dirty,
    );
    title_bar.render(frame, title_area);

    draw_board(frame, board_area, app);

    frame.render_widget(
        Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(dialog) = &tui.edit_dialog {
        EditDialog::new(dialog).render(frame, board_area);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let names = app.board.columns();
    let tasks = app.board.tasks();
    let areas = column_areas(area, names.len());

    for (index, ((name, column_tasks), column_area)) in
        names.iter().zip(tasks.iter()).zip(areas).enumerate()
    {
        let focused = index == app.cursor.column;
        let mut column = ColumnList::new(name, column_tasks, focused, app.cursor.task);
        column.render(frame, column_area);
    }
}

/// Splits `area` into `count` equal-width columns.
fn column_areas(area: Rect, count: usize) -> Vec<Rect> {
    let constraints = (0..count).map(|_| Constraint::Ratio(1, count as u32));
    Layout::horizontal(constraints).split(area).to_vec()
}
