//! Status bar widget.
//!
//! One line at the bottom of the screen. It shows the drag in progress or
//! the last status message on the left, and short key hints on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::state::Tab;

/// Renders the status bar.
///
/// A grab takes precedence over the status message, since it is the state
/// the next keypress acts on.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use trellis_tui::Tab;
/// use trellis_tui::widgets::render_status_bar;
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(Tab::Tree, Some("Loaded 3 children"), None, area, &mut buf);
/// ```
pub fn render_status_bar(
    tab: Tab,
    status: Option<&str>,
    grabbed_label: Option<&str>,
    area: Rect,
    buf: &mut Buffer,
) {
    let hints = match tab {
        Tab::Tree => "a add  e edit  d delete  m move  ? help",
        Tab::Kanban => "a add  e rename  d delete  m move  ? help",
    };
    let hint_width = u16::try_from(hints.chars().count()).unwrap_or(u16::MAX);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(hint_width.saturating_add(1))])
        .split(area);

    let left = match (grabbed_label, status) {
        (Some(label), _) => Line::from(vec![
            Span::styled(
                " Moving ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {label}: select a target, Enter to drop, Esc to cancel"),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        (None, Some(status)) => Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(Color::Yellow),
        )),
        (None, None) => Line::from(""),
    };

    Paragraph::new(left).render(chunks[0], buf);
    Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Right)
    .render(chunks[1], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn render(tab: Tab, status: Option<&str>, grabbed: Option<&str>) -> String {
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        render_status_bar(tab, status, grabbed, area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn shows_status_message() {
        let content = render(Tab::Tree, Some("Cannot move a node into its own subtree"), None);
        assert!(content.contains("Cannot move a node into its own subtree"));
        assert!(content.contains("e edit"));
    }

    #[test]
    fn grab_replaces_status() {
        let content = render(Tab::Kanban, Some("stale"), Some("Ship it"));
        assert!(content.contains("Moving"));
        assert!(content.contains("Ship it"));
        assert!(!content.contains("stale"));
        assert!(content.contains("e rename"));
    }

    #[test]
    fn narrow_area_does_not_panic() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        render_status_bar(Tab::Tree, Some("hello"), Some("x"), area, &mut buf);
    }
}
