//! Application state management.
//!
//! This module defines the state shared by both tabs: the documents being
//! edited, the per-tab view state, the open dialog, and the item picked up
//! for a keyboard drag.

use trellis_protocol::{CardId, DragId, Forest, KanbanState, NodeId, path_to_key};

use crate::dialog::Dialog;
use crate::kanban_view::KanbanView;
use crate::tree_view::TreeView;

/// The visible tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// The tree editor.
    #[default]
    Tree,
    /// The kanban board.
    Kanban,
}

impl Tab {
    /// Returns the other tab.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Tree => Self::Kanban,
            Self::Kanban => Self::Tree,
        }
    }

    /// Heading shown above the tab's content.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Tree => "Tree View Component",
            Self::Kanban => "Kanban Board Component",
        }
    }

    /// Short name used in the tab strip.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Tree => "Tree",
            Self::Kanban => "Kanban",
        }
    }

    /// All tabs, in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Tree, Self::Kanban]
    }
}

/// An item picked up for a keyboard drag.
///
/// Nodes are tracked by id rather than path so that a grab survives edits
/// made while it is held (for example a lazy sibling finishing its load).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grab {
    /// A tree node.
    Node {
        /// Id of the grabbed node.
        id: NodeId,
    },
    /// A kanban card.
    Card {
        /// Id of the grabbed card.
        card_id: CardId,
    },
}

/// The application state.
///
/// Contains all mutable state for the TUI application: both documents,
/// their view state, and the transient interaction state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The visible tab.
    pub tab: Tab,
    /// The tree being edited.
    pub forest: Forest,
    /// The kanban board.
    pub kanban: KanbanState,
    /// Tree expansion and cursor.
    pub tree_view: TreeView,
    /// Board selection.
    pub kanban_view: KanbanView,
    /// The open modal dialog, if any.
    pub dialog: Option<Dialog>,
    /// The item being dragged, if any.
    pub grabbed: Option<Grab>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// One-line feedback shown in the status bar.
    pub status: Option<String>,
}

impl AppState {
    /// Creates the state for the given documents, on the tree tab with
    /// everything collapsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_protocol::dummy::{initial_forest, initial_kanban};
    /// use trellis_tui::{AppState, Tab};
    ///
    /// let state = AppState::new(initial_forest(), initial_kanban());
    /// assert_eq!(state.tab, Tab::Tree);
    /// assert!(state.grabbed.is_none());
    /// ```
    #[must_use]
    pub fn new(forest: Forest, kanban: KanbanState) -> Self {
        Self {
            tab: Tab::default(),
            forest,
            kanban,
            tree_view: TreeView::new(),
            kanban_view: KanbanView::new(),
            dialog: None,
            grabbed: None,
            help_visible: false,
            status: None,
        }
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        if self.help_visible {
            self.help_visible = false;
            true
        } else {
            false
        }
    }

    /// Switches to the other tab. A held grab is dropped, since it belongs
    /// to the tab it was taken on.
    pub fn switch_tab(&mut self) {
        self.tab = self.tab.next();
        self.grabbed = None;
    }

    /// Replaces the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Picks up the selected node or card. Returns `false` if nothing is
    /// selected.
    pub fn grab_selected(&mut self) -> bool {
        self.grabbed = match self.tab {
            Tab::Tree => self
                .tree_view
                .selected_row(&self.forest)
                .map(|row| Grab::Node { id: row.id }),
            Tab::Kanban => self
                .kanban_view
                .selected_card_id(&self.kanban)
                .map(|card_id| Grab::Card { card_id }),
        };
        self.grabbed.is_some()
    }

    /// Releases the grabbed item without moving it.
    ///
    /// Returns `true` if something was held.
    #[must_use]
    pub fn cancel_grab(&mut self) -> bool {
        self.grabbed.take().is_some()
    }

    /// Drag id of the grabbed item, computed against the current documents.
    ///
    /// Returns `None` if nothing is grabbed or the grabbed item is gone.
    #[must_use]
    pub fn grabbed_drag_id(&self) -> Option<String> {
        match self.grabbed.as_ref()? {
            Grab::Node { id } => self.forest.path_of(id).map(|path| path_to_key(&path)),
            Grab::Card { card_id } => self
                .kanban
                .card(card_id)
                .map(|_| DragId::Card(card_id.clone()).to_string()),
        }
    }

    /// Drag id of the item under the cursor on the active tab.
    ///
    /// On the board, a selected column header is a column target.
    #[must_use]
    pub fn drop_target(&self) -> Option<String> {
        match self.tab {
            Tab::Tree => self.tree_view.selected_row(&self.forest).map(|row| row.key),
            Tab::Kanban => match self.kanban_view.selected_card_id(&self.kanban) {
                Some(card_id) => Some(DragId::Card(card_id).to_string()),
                None => self
                    .kanban_view
                    .selected_column(&self.kanban)
                    .map(|column| DragId::Column(column.id.clone()).to_string()),
            },
        }
    }

    /// Display name of the grabbed item.
    #[must_use]
    pub fn grabbed_label(&self) -> Option<String> {
        match self.grabbed.as_ref()? {
            Grab::Node { id } => {
                let path = self.forest.path_of(id)?;
                self.forest.node_at(&path).map(|node| node.name.clone())
            }
            Grab::Card { card_id } => self.kanban.card(card_id).map(|card| card.title.clone()),
        }
    }
}
