//! Modal dialog widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::centered_rect;
use crate::dialog::{Dialog, DialogKind};

/// Width of the dialog panel.
const DIALOG_WIDTH: u16 = 50;

/// Height of the dialog panel.
const DIALOG_HEIGHT: u16 = 7;

/// Renders a centered dialog on top of the existing content.
///
/// Prompts show the text typed so far followed by a cursor; confirmations
/// show the accepted answers.
///
/// # Layout
///
/// ```text
/// ╭ New node name? ────────────────────╮
/// │                                    │
/// │  > Release notes▏                  │
/// │                                    │
/// │  Enter accept  Esc cancel          │
/// ╰────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use trellis_tui::dialog::{Dialog, PendingAction};
/// use trellis_tui::widgets::render_dialog;
///
/// let dialog = Dialog::confirm("Delete \"Docs\" and its subtree?", PendingAction::DeleteNode(vec![0]));
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_dialog(&dialog, area, &mut buf);
/// ```
pub fn render_dialog(dialog: &Dialog, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    Clear.render(popup_area, buf);

    let accent = Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Green);
    let hint_style = Style::default().fg(Color::DarkGray);

    let (body, hints) = match &dialog.kind {
        DialogKind::Prompt { input } => (
            Line::from(vec![
                Span::styled("  > ", accent),
                Span::styled(input.clone(), Style::default().fg(Color::White)),
                Span::styled("▏", accent),
            ]),
            Line::from(vec![
                Span::styled("  Enter", key_style),
                Span::styled(" accept  ", hint_style),
                Span::styled("Esc", key_style),
                Span::styled(" cancel", hint_style),
            ]),
        ),
        DialogKind::Confirm => (
            Line::from(Span::styled(
                format!("  {}", dialog.message),
                Style::default().fg(Color::White),
            )),
            Line::from(vec![
                Span::styled("  y", key_style),
                Span::styled(" yes  ", hint_style),
                Span::styled("n", key_style),
                Span::styled(" no", hint_style),
            ]),
        ),
    };

    let title = match dialog.kind {
        DialogKind::Prompt { .. } => format!(" {} ", dialog.message),
        DialogKind::Confirm => " Confirm ".to_string(),
    };

    Paragraph::new(vec![Line::from(""), body, Line::from(""), hints])
        .block(
            Block::default()
                .title(Span::styled(title, accent))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::LightYellow)),
        )
        .wrap(Wrap { trim: false })
        .render(popup_area, buf);
}
