//! Widget components for the trellis TUI.
//!
//! Each widget is a pure function that renders state to a buffer, which
//! keeps them easy to test and to compose.
//!
//! # Modules
//!
//! - [`tree`]: The indented tree with chevrons, colors and loading markers
//! - [`board`]: The kanban board, one column per board column
//! - [`column`]: A single board column with its cards
//! - [`card`]: A single kanban card
//! - [`dialog`]: The modal prompt/confirmation dialog
//! - [`help`]: The keybinding overlay
//! - [`status_bar`]: The footer with status and hints
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use trellis_protocol::dummy::initial_kanban;
//! use trellis_tui::KanbanView;
//! use trellis_tui::widgets;
//!
//! let board = initial_kanban();
//! let area = Rect::new(0, 0, 80, 20);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_board(&board, &KanbanView::new(), None, area, &mut buf);
//! ```

pub mod board;
pub mod card;
pub mod column;
pub mod dialog;
pub mod help;
pub mod status_bar;
pub mod tree;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use board::render_board;
pub use card::render_card;
pub use column::{ColumnPosition, render_column};
pub use dialog::render_dialog;
pub use help::render_help_overlay;
pub use status_bar::render_status_bar;
pub use tree::render_tree;

/// Parses a `#rrggbb` color hint into a terminal color.
///
/// Anything else yields `None`, and the caller falls back to its default.
///
/// # Examples
///
/// ```
/// use ratatui::style::Color;
/// use trellis_tui::widgets::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#2563eb"), Some(Color::Rgb(0x25, 0x63, 0xeb)));
/// assert_eq!(parse_hex_color("blue"), None);
/// ```
#[must_use]
pub fn parse_hex_color(hint: &str) -> Option<Color> {
    let hex = hint.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Creates a centered rectangle within a given area.
///
/// If the requested dimensions exceed the available area, the rectangle
/// will be clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}

/// Truncates a string to fit within a given width, adding ellipsis if needed.
pub(crate) fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_width).collect()
    }
}

/// First row to draw so that `selected` stays visible in a list of `total`
/// rows of which `visible` fit, keeping the selection near the middle.
pub(crate) fn scroll_offset(selected: Option<usize>, total: usize, visible: usize) -> usize {
    let Some(selected) = selected else {
        return 0;
    };
    if total <= visible {
        return 0;
    }

    let max_offset = total.saturating_sub(visible);
    if selected < visible / 2 {
        0
    } else {
        (selected.saturating_sub(visible / 2)).min(max_offset)
    }
}
