//! Kanban board rendering widget.
//!
//! Lays the board's columns out side by side, in column order, with equal
//! widths.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
};
use trellis_protocol::KanbanState;

use super::column::{ColumnFocus, ColumnPosition, render_column};
use crate::kanban_view::KanbanView;

/// Renders the complete board to the buffer.
///
/// # Arguments
///
/// * `state` - The board contents
/// * `view` - Which column and card are selected
/// * `grabbed` - Id of the card being dragged, if any
/// * `area` - The rectangular area to render into
/// * `buf` - The buffer to render into
///
/// # Layout
///
/// ```text
/// ╭ Todo (3) ────┬ In Progress (2) ┬ Done (1) ─────╮
/// │┌──────────┐  │┌──────────┐     │┌──────────┐  │
/// ││ Card 1   │  ││ Card 4   │     ││ Card 6   │  │
/// │└──────────┘  │└──────────┘     │└──────────┘  │
/// ╰──────────────┴─────────────────┴──────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use trellis_protocol::dummy::initial_kanban;
/// use trellis_tui::KanbanView;
/// use trellis_tui::widgets::render_board;
///
/// let board = initial_kanban();
/// let area = Rect::new(0, 0, 80, 20);
/// let mut buf = Buffer::empty(area);
///
/// render_board(&board, &KanbanView::new(), None, area, &mut buf);
/// ```
pub fn render_board(
    state: &KanbanState,
    view: &KanbanView,
    grabbed: Option<&str>,
    area: Rect,
    buf: &mut Buffer,
) {
    let columns: Vec<_> = state.columns_in_order().collect();
    if columns.is_empty() {
        return;
    }

    let count = columns.len();
    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count as u32)))
        .split(area);

    let selected = view.column_index();
    for (i, column) in columns.into_iter().enumerate() {
        let is_focused = selected == i;
        let focus = ColumnFocus {
            is_focused,
            selected: if is_focused { view.card_index() } else { None },
            prev_focused: i > 0 && selected == i - 1,
            grabbed,
        };
        render_column(
            column,
            state,
            focus,
            ColumnPosition::of(i, count),
            column_areas[i],
            buf,
        );
    }
}
