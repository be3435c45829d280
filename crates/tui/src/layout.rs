//! Shared layout measurements for the TUI.
//!
//! Every widget that needs to agree on a size reads it from here, so the
//! proportions of the screen can be tuned in one place.

/// Height of the header bar in rows.
///
/// The header shows the active tab's title and the tab strip.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of each kanban card in rows: two border rows and one title row.
pub const CARD_HEIGHT: u16 = 3;

/// Columns of indentation per tree depth level.
pub const TREE_INDENT: u16 = 2;

/// Minimum terminal height for useful rendering.
///
/// Below this height, we display a "terminal too small" message.
pub const MIN_HEIGHT: u16 = 10;

/// Minimum terminal height for rendering with header.
///
/// Between `MIN_HEIGHT` and this value the header is hidden to give the
/// content its rows back.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
///
/// The board has three columns; each needs room for borders and a
/// truncated card title.
pub const MIN_WIDTH: u16 = 40;
