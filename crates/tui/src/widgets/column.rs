//! Board column rendering widget.
//!
//! Renders one kanban column: a header with the title and card count,
//! followed by a vertical list of cards.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use trellis_protocol::{Column, KanbanState};

use super::card::render_card;
use super::scroll_offset;
use crate::layout::CARD_HEIGHT;

/// Position of a column in the horizontal layout.
///
/// Adjacent columns share a border, so each position draws a different
/// subset of borders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPosition {
    /// Leftmost column: rounded corners on the left, no right border.
    First,
    /// Inner columns: T-connectors on the left, no right border.
    Middle,
    /// Rightmost column: T-connectors on the left, rounded on the right.
    Last,
    /// The only column: rounded on both sides.
    Only,
}

impl ColumnPosition {
    /// Position of column `idx` among `count` columns.
    #[must_use]
    pub fn of(idx: usize, count: usize) -> Self {
        match (idx, count) {
            (_, 0 | 1) => Self::Only,
            (0, _) => Self::First,
            (i, n) if i + 1 == n => Self::Last,
            _ => Self::Middle,
        }
    }

    fn borders(self) -> Borders {
        match self {
            Self::First | Self::Middle => Borders::TOP | Borders::BOTTOM | Borders::LEFT,
            Self::Last | Self::Only => Borders::ALL,
        }
    }
}

const BORDER_SET_FIRST: border::Set = border::Set {
    top_left: "╭",
    top_right: "─",
    bottom_left: "╰",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

const BORDER_SET_MIDDLE: border::Set = border::Set {
    top_left: "┬",
    top_right: "─",
    bottom_left: "┴",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

const BORDER_SET_LAST: border::Set = border::Set {
    top_left: "┬",
    top_right: "╮",
    bottom_left: "┴",
    bottom_right: "╯",
    vertical_left: "│",
    vertical_right: "│",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Selection state of one column, as far as rendering is concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnFocus<'a> {
    /// Whether this column holds the selection.
    pub is_focused: bool,
    /// Selected card index, or `None` when the header is selected.
    pub selected: Option<usize>,
    /// Whether the column to the left holds the selection.
    pub prev_focused: bool,
    /// Id of the card being dragged, if any.
    pub grabbed: Option<&'a str>,
}

/// Renders a single column to the buffer.
///
/// Empty columns show a "No cards" placeholder. When the column is focused
/// with no card selected, the header is highlighted: that is where a
/// dragged card lands at the bottom of the column.
///
/// # Layout
///
/// ```text
/// ╭ Todo (2) ──────
/// │┌────────────┐
/// ││ Card 1     │
/// │└────────────┘
/// │┌────────────┐
/// ││ Card 2     │
/// │└────────────┘
/// ╰────────────────
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use trellis_protocol::dummy::initial_kanban;
/// use trellis_tui::widgets::column::{ColumnFocus, ColumnPosition, render_column};
///
/// let board = initial_kanban();
/// let todo = board.column("todo").unwrap();
///
/// let area = Rect::new(0, 0, 24, 15);
/// let mut buf = Buffer::empty(area);
/// render_column(todo, &board, ColumnFocus::default(), ColumnPosition::First, area, &mut buf);
/// ```
pub fn render_column(
    column: &Column,
    state: &KanbanState,
    focus: ColumnFocus<'_>,
    position: ColumnPosition,
    area: Rect,
    buf: &mut Buffer,
) {
    let border_style = if focus.is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = format!(" {} ({}) ", column.title, column.len());
    let title_style = match (focus.is_focused, focus.selected) {
        (true, None) => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (true, Some(_)) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (false, _) => Style::default().fg(Color::White),
    };

    let block = Block::default()
        .title(Span::styled(title, title_style))
        .borders(position.borders())
        .border_style(border_style);
    let block = match position {
        ColumnPosition::First => block.border_set(BORDER_SET_FIRST),
        ColumnPosition::Middle => block.border_set(BORDER_SET_MIDDLE),
        ColumnPosition::Last => block.border_set(BORDER_SET_LAST),
        ColumnPosition::Only => block.border_type(BorderType::Rounded),
    };

    let inner_area = block.inner(area);
    block.render(area, buf);

    // The shared left border belongs to both columns; light it up when the
    // column to the left is focused.
    if focus.prev_focused && !focus.is_focused && area.width > 0 {
        let highlight_style = Style::default().fg(Color::Cyan);
        for y in area.y..area.y.saturating_add(area.height) {
            if let Some(cell) = buf.cell_mut((area.x, y)) {
                cell.set_style(highlight_style);
            }
        }
    }

    if column.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No cards",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .render(inner_area, buf);
        return;
    }

    let visible_cards = (inner_area.height / CARD_HEIGHT).max(1) as usize;
    let offset = scroll_offset(focus.selected, column.len(), visible_cards);

    let card_count = column.len().min(visible_cards);
    let mut constraints: Vec<Constraint> = (0..card_count)
        .map(|_| Constraint::Length(CARD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let card_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner_area);

    for (i, card_area) in card_areas.iter().take(card_count).enumerate() {
        let card_idx = offset + i;
        let Some(card) = column.card_ids.get(card_idx).and_then(|id| state.card(id)) else {
            break;
        };
        let is_selected = focus.is_focused && focus.selected == Some(card_idx);
        let is_grabbed = focus.grabbed == Some(card.id.as_str());
        render_card(card, is_selected, is_grabbed, *card_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use trellis_protocol::dummy::initial_kanban;

    #[test]
    fn position_of_columns() {
        assert_eq!(ColumnPosition::of(0, 1), ColumnPosition::Only);
        assert_eq!(ColumnPosition::of(0, 3), ColumnPosition::First);
        assert_eq!(ColumnPosition::of(1, 3), ColumnPosition::Middle);
        assert_eq!(ColumnPosition::of(2, 3), ColumnPosition::Last);
    }

    #[test]
    fn render_column_shows_header_and_cards() {
        let board = initial_kanban();
        let column = board.column("inprogress").unwrap();
        let area = Rect::new(0, 0, 32, 12);
        let mut buf = Buffer::empty(area);

        render_column(column, &board, ColumnFocus::default(), ColumnPosition::Middle, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("In Progress (2)"));
        assert!(content.contains("Implement authentication"));
        assert!(content.contains("Set up database schema"));
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "┬");
    }

    #[test]
    fn render_empty_column() {
        let board = KanbanState::with_columns(vec![Column::new("done", "Done")]);
        let column = board.column("done").unwrap();
        let area = Rect::new(0, 0, 20, 8);
        let mut buf = Buffer::empty(area);

        render_column(column, &board, ColumnFocus::default(), ColumnPosition::Last, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Done (0)"));
        assert!(content.contains("No cards"));
    }

    #[test]
    fn selected_header_is_highlighted() {
        let board = initial_kanban();
        let column = board.column("todo").unwrap();
        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);
        let focus = ColumnFocus {
            is_focused: true,
            ..Default::default()
        };

        render_column(column, &board, focus, ColumnPosition::First, area, &mut buf);

        // " Todo (3) " starts right after the corner.
        assert_eq!(buf.cell((2, 0)).unwrap().bg, Color::Cyan);
    }

    #[test]
    fn only_visible_cards_are_drawn() {
        let board = initial_kanban();
        let column = board.column("todo").unwrap();
        // Room for a single card.
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        let focus = ColumnFocus {
            is_focused: true,
            selected: Some(2),
            ..Default::default()
        };

        render_column(column, &board, focus, ColumnPosition::Only, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("Review codebase structure"));
        assert!(!content.contains("Create initial project plan"));
    }
}
