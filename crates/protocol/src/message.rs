//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI.
///
/// # Examples
///
/// ```
/// use trellis_protocol::Message;
///
/// let msg = Message::NavigateDown;
/// assert!(msg.is_navigation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move the cursor up (previous row or card).
    NavigateUp,
    /// Move the cursor down (next row or card).
    NavigateDown,
    /// Tree: collapse or go to parent. Kanban: previous column.
    NavigateLeft,
    /// Tree: expand or go to first child. Kanban: next column.
    NavigateRight,
    /// Expand or collapse the selected tree row.
    ToggleExpand,
    /// Add a child node or a card.
    AddItem,
    /// Rename the selected node or card.
    EditItem,
    /// Delete the selected node or card.
    DeleteItem,
    /// Pick up the selected item for keyboard drag-and-drop.
    Grab,
    /// Drop the grabbed item onto the selected item.
    Drop {
        /// Whether the cross-level modifier was held.
        cross_level: bool,
    },
    /// Switch between the tree and kanban tabs.
    SwitchTab,
    /// Toggle help overlay.
    ToggleHelp,
    /// Escape: cancel a drag or close an overlay (contextual).
    Escape,
    /// Quit the application.
    Quit,

    // --- Dialog messages ---
    /// Type a character into the open dialog.
    DialogInput {
        /// The character that was input.
        ch: char,
    },
    /// Delete the last character in the open dialog.
    DialogBackspace,
    /// Accept the open dialog.
    DialogConfirm,
    /// Dismiss the open dialog.
    DialogCancel,
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(!Message::Grab.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft | Self::NavigateRight | Self::NavigateUp | Self::NavigateDown
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message targets an open dialog.
    #[must_use]
    pub fn is_dialog(&self) -> bool {
        matches!(
            self,
            Self::DialogInput { .. }
                | Self::DialogBackspace
                | Self::DialogConfirm
                | Self::DialogCancel
        )
    }

    /// Returns `true` if this message edits state (as opposed to moving the
    /// cursor or toggling view state).
    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::AddItem | Self::EditItem | Self::DeleteItem | Self::Drop { .. }
        )
    }
}
