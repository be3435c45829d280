//! Kanban card rendering widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use trellis_protocol::Card;

use super::truncate_string;

/// Renders a card to the buffer.
///
/// The card shows its title on a single line inside a bordered box. A
/// selected card gets a bright border; the card being dragged is drawn
/// in magenta with a double border.
///
/// # Layout
///
/// ```text
/// ┌────────────────┐
/// │ Design landi...│
/// └────────────────┘
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use trellis_protocol::Card;
/// use trellis_tui::widgets::render_card;
///
/// let card = Card::new("Write API documentation");
/// let area = Rect::new(0, 0, 20, 3);
/// let mut buf = Buffer::empty(area);
///
/// render_card(&card, false, false, area, &mut buf);
/// ```
pub fn render_card(card: &Card, is_selected: bool, is_grabbed: bool, area: Rect, buf: &mut Buffer) {
    // Skip rendering if area is too small
    if area.width < 4 || area.height < 3 {
        return;
    }

    let (border_color, border_type, title_style) = if is_grabbed {
        (
            Color::Magenta,
            BorderType::Double,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
    } else if is_selected {
        (
            Color::LightCyan,
            BorderType::Plain,
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Color::DarkGray,
            BorderType::Plain,
            Style::default().fg(Color::White),
        )
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let title = truncate_string(&card.title, inner_width);

    Paragraph::new(Line::from(Span::styled(title, title_style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(Style::default().fg(border_color)),
        )
        .render(area, buf);
}
