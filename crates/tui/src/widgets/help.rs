//! Help overlay widget.
//!
//! This module provides the help overlay that displays all available keybindings
//! when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 42;

/// The height of the help overlay panel.
const HELP_HEIGHT: u16 = 26;

/// Renders a centered help overlay displaying all keybindings.
///
/// The overlay is rendered on top of the existing content, clearing the
/// area behind it first.
///
/// # Arguments
///
/// * `area` - The full terminal area (the overlay will be centered within it)
/// * `buf` - The buffer to render into
///
/// # Layout
///
/// ```text
/// ╭ Help ──────────────────────────────╮
/// │                                    │
/// │  Navigation                        │
/// │  ↑ ↓         Select previous/next  │
/// │  ← →         Collapse/expand       │
/// │  Space       Toggle expand         │
/// │  Tab         Switch view           │
/// │                                    │
/// │  Editing                           │
/// │  a           Add                   │
/// │  ...                               │
/// ╰────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use trellis_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 30);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(area, &mut buf);
/// ```
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(HELP_WIDTH, HELP_HEIGHT, area);

    // Clear the area behind the popup for a clean look
    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    Paragraph::new(build_help_lines())
        .block(help_block)
        .alignment(Alignment::Left)
        .render(popup_area, buf);
}

/// Builds the lines of help content.
fn build_help_lines() -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let mut lines = vec![Line::from("")];
    let sections: [(&str, &[(&str, &str)]); 3] = [
        (
            "Navigation",
            &[
                ("↑ ↓", "Select previous/next"),
                ("← →", "Collapse/expand, column"),
                ("Space", "Toggle expand"),
                ("Tab", "Switch view"),
            ],
        ),
        (
            "Editing",
            &[
                ("a", "Add node or card"),
                ("e", "Rename"),
                ("d", "Delete"),
            ],
        ),
        (
            "Drag and drop",
            &[
                ("m", "Grab selected item"),
                ("Enter", "Drop on selection"),
                ("Alt+Enter", "Drop across levels"),
                ("Esc", "Cancel drag"),
            ],
        ),
    ];
    for (title, bindings) in sections {
        lines.push(Line::from(Span::styled(format!("  {title}"), header_style)));
        lines.extend(bindings.iter().map(|(key, action)| binding_line(key, action)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("  General", header_style)));
    lines.push(binding_line("?", "Toggle help"));
    lines.push(binding_line("Ctrl+C", "Quit"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Press any key to close", hint_style)));
    lines
}

fn binding_line(key: &str, action: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<12}"), Style::default().fg(Color::Green)),
        Span::styled(action.to_string(), Style::default().fg(Color::White)),
    ])
}
