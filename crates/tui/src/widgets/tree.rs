//! Tree rendering widget.
//!
//! Draws the flattened rows of the tree editor: one line per visible node,
//! indented by depth, with an expand chevron, a colored bullet, the name,
//! and a loading marker while children are being fetched.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::{parse_hex_color, scroll_offset, truncate_string};
use crate::layout::TREE_INDENT;
use crate::tree_view::FlatRow;

/// Marker appended to rows whose children are being fetched.
pub const LOADING_MARKER: &str = "Loading…";

/// Renders the tree rows to the buffer.
///
/// # Arguments
///
/// * `rows` - Visible rows, as returned by [`TreeView::rows`](crate::TreeView::rows)
/// * `cursor` - Index of the selected row
/// * `grabbed` - Path key of the row being dragged, if any
/// * `area` - The rectangular area to render into
/// * `buf` - The buffer to render into
///
/// # Layout
///
/// ```text
/// ╭ Nodes (3) ──────────────────╮
/// │▾ ● Docs                     │
/// │    ● Guide                  │
/// │▸ ● Remote  Loading…         │
/// ╰─────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use trellis_protocol::dummy::initial_forest;
/// use trellis_tui::TreeView;
/// use trellis_tui::widgets::render_tree;
///
/// let forest = initial_forest();
/// let rows = TreeView::new().rows(&forest);
///
/// let area = Rect::new(0, 0, 40, 10);
/// let mut buf = Buffer::empty(area);
/// render_tree(&rows, 0, None, area, &mut buf);
/// ```
pub fn render_tree(rows: &[FlatRow], cursor: usize, grabbed: Option<&str>, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Nodes ({}) ", rows.len()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    block.render(area, buf);

    if rows.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            "No nodes. Press a to add one.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .render(inner, buf);
        return;
    }

    let visible = usize::from(inner.height).max(1);
    let offset = scroll_offset(Some(cursor), rows.len(), visible);
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(idx, row)| {
            let is_grabbed = grabbed == Some(row.key.as_str());
            row_line(row, idx == cursor, is_grabbed, usize::from(inner.width))
        })
        .collect();

    Paragraph::new(lines).render(inner, buf);
}

fn row_line(row: &FlatRow, is_selected: bool, is_grabbed: bool, width: usize) -> Line<'static> {
    let indent = " ".repeat(row.depth * usize::from(TREE_INDENT));
    let bullet_color = row
        .color
        .as_deref()
        .and_then(parse_hex_color)
        .unwrap_or(Color::Gray);

    let name_style = match (is_selected, is_grabbed) {
        (_, true) => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (false, false) => Style::default().fg(Color::White),
    };

    // indent + chevron + space + bullet + space
    let used = indent.chars().count() + 4;
    let name = truncate_string(&row.name, width.saturating_sub(used));

    let mut spans = vec![
        Span::raw(indent),
        Span::styled(row.marker().to_string(), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled("●", Style::default().fg(bullet_color)),
        Span::raw(" "),
        Span::styled(name, name_style),
    ];
    if is_grabbed {
        spans.push(Span::styled(" ⇅", Style::default().fg(Color::Magenta)));
    }
    if row.loading {
        spans.push(Span::styled(
            format!("  {LOADING_MARKER}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}
