//! Drag-and-drop resolution.
//!
//! A completed drag is reported as a single [`DragEnd`] event naming the
//! dragged item and the item it was dropped on. The resolvers here turn that
//! event into a concrete engine move, or explain why nothing should happen.
//! They never touch state themselves.
//!
//! Identifier namespaces differ per widget:
//!
//! - tree rows are identified by their path key (`"0.2.1"`);
//! - kanban items carry a prefix, `card:<id>` or `col:<id>`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProtocolError, Result};
use crate::kanban::{CardId, ColumnId, KanbanState};
use crate::path::{Path, is_descendant_path, key_to_path, parent_path};

const CARD_DRAG_PREFIX: &str = "card:";
const COLUMN_DRAG_PREFIX: &str = "col:";

/// A completed drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEnd {
    /// Identifier of the dragged item.
    pub active: String,
    /// Identifier of the item under the pointer at drop time, if any.
    pub over: Option<String>,
    /// Whether the cross-level modifier was held at drop time.
    #[serde(default)]
    pub cross_level: bool,
}

impl DragEnd {
    /// Creates a drop of `active` onto `over` without the cross-level modifier.
    #[must_use]
    pub fn new(active: impl Into<String>, over: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            over: Some(over.into()),
            cross_level: false,
        }
    }

    /// Creates a drag that ended over nothing.
    #[must_use]
    pub fn cancelled(active: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            over: None,
            cross_level: false,
        }
    }

    /// Sets the cross-level modifier.
    #[must_use]
    pub fn with_cross_level(mut self, cross_level: bool) -> Self {
        self.cross_level = cross_level;
        self
    }
}

/// A kanban drag identifier.
///
/// # Examples
///
/// ```
/// use trellis_protocol::DragId;
///
/// let id: DragId = "card:c1".parse().unwrap();
/// assert_eq!(id, DragId::Card("c1".to_string()));
/// assert_eq!(DragId::Column("todo".to_string()).to_string(), "col:todo");
/// assert!("c1".parse::<DragId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DragId {
    /// A card, by card id.
    Card(CardId),
    /// A column, by column id.
    Column(ColumnId),
}

impl DragId {
    /// Parses a prefixed drag identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidDragId`] when the prefix is missing or
    /// the remainder is empty.
    pub fn parse(raw: &str) -> Result<Self> {
        if let Some(id) = raw.strip_prefix(CARD_DRAG_PREFIX).filter(|id| !id.is_empty()) {
            return Ok(Self::Card(id.to_string()));
        }
        if let Some(id) = raw.strip_prefix(COLUMN_DRAG_PREFIX).filter(|id| !id.is_empty()) {
            return Ok(Self::Column(id.to_string()));
        }
        Err(ProtocolError::InvalidDragId(raw.to_string()))
    }
}

impl std::str::FromStr for DragId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card(id) => write!(f, "{CARD_DRAG_PREFIX}{id}"),
            Self::Column(id) => write!(f, "{COLUMN_DRAG_PREFIX}{id}"),
        }
    }
}

/// A resolved kanban move, ready for [`KanbanState::move_card`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMove {
    /// Card being moved.
    pub card_id: CardId,
    /// Column currently holding the card.
    pub from: ColumnId,
    /// Destination column.
    pub to: ColumnId,
    /// Destination index, clamped by the engine after removal.
    pub to_index: usize,
}

/// Resolves a kanban drop into a card move.
///
/// Dropping on a column sends the card to the end of that column. Dropping
/// on a card inserts the moving card at the target's current index, pushing
/// the target down. Anything unresolvable yields `None`.
///
/// # Examples
///
/// ```
/// use trellis_protocol::drag::{DragEnd, resolve_kanban_drop};
/// use trellis_protocol::dummy::initial_kanban;
///
/// let state = initial_kanban();
/// let card = state.column("todo").unwrap().card_ids[0].clone();
///
/// let mv = resolve_kanban_drop(&state, &DragEnd::new(format!("card:{card}"), "col:done")).unwrap();
/// assert_eq!(mv.from, "todo");
/// assert_eq!(mv.to, "done");
/// assert_eq!(mv.to_index, 1);
/// ```
#[must_use]
pub fn resolve_kanban_drop(state: &KanbanState, event: &DragEnd) -> Option<CardMove> {
    let over = event.over.as_deref()?;

    let DragId::Card(card_id) = DragId::parse(&event.active).ok()? else {
        debug!(active = %event.active, "only cards can be dragged");
        return None;
    };
    let from = state.column_of(&card_id)?.clone();

    let (to, to_index) = match DragId::parse(over).ok()? {
        DragId::Column(column_id) => {
            let column = state.column(&column_id)?;
            (column_id, column.len())
        }
        DragId::Card(target) => {
            let to = state.column_of(&target)?.clone();
            let index = state.column(&to)?.position_of(&target)?;
            (to, index)
        }
    };

    Some(CardMove {
        card_id,
        from,
        to,
        to_index,
    })
}

/// A resolved tree move, ready for [`Forest::move_node`](crate::Forest::move_node).
///
/// Both paths are in the coordinates of the forest the drop was resolved
/// against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeMove {
    /// Path of the dragged node.
    pub from: Path,
    /// Path of the destination parent (empty for the roots).
    pub to_parent: Path,
    /// Index within the destination after the dragged node is removed.
    pub to_index: usize,
}

/// Why a tree drop was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// The target has a different parent and the cross-level modifier was
    /// not held.
    CrossLevelWithoutModifier,
    /// The destination lies inside the dragged node's own subtree.
    IntoOwnSubtree,
}

impl fmt::Display for DropRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CrossLevelWithoutModifier => {
                f.write_str("hold the cross-level modifier to move between levels")
            }
            Self::IntoOwnSubtree => f.write_str("cannot move a node into its own subtree"),
        }
    }
}

/// Outcome of resolving a tree drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeDrop {
    /// Apply this move.
    Move(TreeMove),
    /// Nothing to do: no target, malformed keys, or a drop onto itself.
    Ignored,
    /// The drop was understood but is not allowed.
    Rejected(DropRejection),
}

/// Resolves a tree drop between two path keys.
///
/// Same-parent drops reorder within that level at the target's index.
/// Different-parent drops require the cross-level modifier and then move the
/// node under the target's parent at the target's index, unless that parent
/// is the dragged node or lies inside it.
///
/// # Examples
///
/// ```
/// use trellis_protocol::drag::{DragEnd, DropRejection, TreeDrop, resolve_tree_drop};
///
/// let same_level = resolve_tree_drop(&DragEnd::new("0", "2"));
/// assert!(matches!(same_level, TreeDrop::Move(ref mv) if mv.to_index == 2));
///
/// let across = resolve_tree_drop(&DragEnd::new("0", "1.0"));
/// assert_eq!(across, TreeDrop::Rejected(DropRejection::CrossLevelWithoutModifier));
/// ```
#[must_use]
pub fn resolve_tree_drop(event: &DragEnd) -> TreeDrop {
    let Some(over) = event.over.as_deref() else {
        return TreeDrop::Ignored;
    };
    let (Ok(from), Ok(to)) = (key_to_path(&event.active), key_to_path(over)) else {
        debug!(active = %event.active, over, "malformed path key in drop");
        return TreeDrop::Ignored;
    };
    let Some(&to_index) = to.last() else {
        return TreeDrop::Ignored;
    };
    if from.is_empty() || from == to {
        return TreeDrop::Ignored;
    }

    let to_parent = parent_path(&to);
    if parent_path(&from) != to_parent {
        if !event.cross_level {
            return TreeDrop::Rejected(DropRejection::CrossLevelWithoutModifier);
        }
        if to_parent == from.as_slice() || is_descendant_path(&from, to_parent) {
            return TreeDrop::Rejected(DropRejection::IntoOwnSubtree);
        }
    }

    TreeDrop::Move(TreeMove {
        to_parent: to_parent.to_vec(),
        from,
        to_index,
    })
}
