//! Kanban board controller.
//!
//! [`KanbanView`] tracks which column and card are selected and drives the
//! [`KanbanState`] engine: adding, renaming and deleting cards, and dropping
//! a dragged card onto a column or another card.

use tracing::{debug, info};
use trellis_protocol::{CardId, CardMove, Column, DragEnd, KanbanState, resolve_kanban_drop};

use crate::provider::Interaction;

/// Prompt shown when adding a card.
pub const NEW_CARD_PROMPT: &str = "Card title?";

/// Prompt shown when renaming a card.
pub const RENAME_CARD_PROMPT: &str = "Edit card title:";

/// Selection state of the board.
///
/// `card` is `None` while the column header itself is selected, which is
/// also where a grabbed card lands at the bottom of the column.
///
/// # Examples
///
/// ```
/// use trellis_protocol::dummy::initial_kanban;
/// use trellis_tui::KanbanView;
///
/// let board = initial_kanban();
/// let mut view = KanbanView::new();
///
/// view.navigate_down(&board);
/// assert_eq!(view.card_index(), Some(0));
///
/// view.navigate_right(&board);
/// assert_eq!(view.column_index(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KanbanView {
    column: usize,
    card: Option<usize>,
}

impl KanbanView {
    /// Creates a view with the first column header selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the selected column, in display order.
    #[must_use]
    pub fn column_index(&self) -> usize {
        self.column
    }

    /// Index of the selected card within its column, or `None` when the
    /// header is selected.
    #[must_use]
    pub fn card_index(&self) -> Option<usize> {
        self.card
    }

    /// Returns the selected column.
    #[must_use]
    pub fn selected_column<'a>(&self, state: &'a KanbanState) -> Option<&'a Column> {
        state.columns_in_order().nth(self.column)
    }

    /// Returns the id of the selected card.
    #[must_use]
    pub fn selected_card_id(&self, state: &KanbanState) -> Option<CardId> {
        let column = self.selected_column(state)?;
        column.card_ids.get(self.card?).cloned()
    }

    /// Moves to the previous column, wrapping around.
    pub fn navigate_left(&mut self, state: &KanbanState) {
        let count = state.columns_in_order().count();
        if count == 0 {
            return;
        }
        self.column = if self.column == 0 {
            count - 1
        } else {
            self.column - 1
        };
        self.clamp(state);
    }

    /// Moves to the next column, wrapping around.
    pub fn navigate_right(&mut self, state: &KanbanState) {
        let count = state.columns_in_order().count();
        if count == 0 {
            return;
        }
        self.column = (self.column + 1) % count;
        self.clamp(state);
    }

    /// Moves up one card; from the first card, selects the header.
    pub fn navigate_up(&mut self, _state: &KanbanState) {
        self.card = match self.card {
            Some(0) | None => None,
            Some(idx) => Some(idx - 1),
        };
    }

    /// Moves down one card; from the header, selects the first card.
    pub fn navigate_down(&mut self, state: &KanbanState) {
        let len = self.selected_column(state).map_or(0, Column::len);
        if len == 0 {
            self.card = None;
            return;
        }
        self.card = Some(match self.card {
            None => 0,
            Some(idx) => (idx + 1).min(len - 1),
        });
    }

    /// Puts the selection on `card_id`. Returns `false` if no column holds it.
    pub fn select_card(&mut self, state: &KanbanState, card_id: &str) -> bool {
        for (column_idx, column) in state.columns_in_order().enumerate() {
            if let Some(card_idx) = column.position_of(card_id) {
                self.column = column_idx;
                self.card = Some(card_idx);
                return true;
            }
        }
        false
    }

    /// Keeps the selection on an existing column and card.
    pub fn clamp(&mut self, state: &KanbanState) {
        let count = state.columns_in_order().count();
        self.column = self.column.min(count.saturating_sub(1));
        let len = self.selected_column(state).map_or(0, Column::len);
        self.card = match self.card {
            _ if len == 0 => None,
            Some(idx) => Some(idx.min(len - 1)),
            None => None,
        };
    }

    /// Prompts for a title and adds a card at the bottom of `column_id`,
    /// then selects it. Returns the new card's id, or `None` if the column
    /// does not exist or the user cancelled or entered only whitespace.
    pub fn add_card(
        &mut self,
        state: &mut KanbanState,
        column_id: &str,
        ui: &mut dyn Interaction,
    ) -> Option<CardId> {
        state.column(column_id)?;
        let answer = ui.prompt(NEW_CARD_PROMPT, None)?;
        let title = answer.trim();
        if title.is_empty() {
            return None;
        }

        let next = state.add_card(column_id, title);
        let card_id = next.column(column_id)?.card_ids.last()?.clone();
        *state = next;
        self.select_card(state, &card_id);
        info!(%card_id, column = %column_id, "card added");
        Some(card_id)
    }

    /// Prompts for a new title for the selected card, offering the current
    /// one as the default. Returns `true` if the card was renamed.
    pub fn rename_card(&mut self, state: &mut KanbanState, ui: &mut dyn Interaction) -> bool {
        let Some(card_id) = self.selected_card_id(state) else {
            return false;
        };
        let Some(current) = state.card(&card_id).map(|c| c.title.clone()) else {
            return false;
        };
        let Some(answer) = ui.prompt(RENAME_CARD_PROMPT, Some(&current)) else {
            return false;
        };
        let title = answer.trim();
        if title.is_empty() {
            return false;
        }

        *state = state.rename_card(&card_id, title);
        true
    }

    /// Deletes the selected card. Returns `true` if a card was removed.
    pub fn delete_card(&mut self, state: &mut KanbanState) -> bool {
        let Some(card_id) = self.selected_card_id(state) else {
            return false;
        };
        *state = state.delete_card(&card_id);
        self.clamp(state);
        info!(%card_id, "card deleted");
        true
    }

    /// Resolves a finished drag and applies it, keeping the moved card
    /// selected.
    pub fn on_drag_end(&mut self, state: &mut KanbanState, event: &DragEnd) -> Option<CardMove> {
        let Some(mv) = resolve_kanban_drop(state, event) else {
            debug!(active = %event.active, over = ?event.over, "card drop ignored");
            return None;
        };
        *state = state.apply_move(&mv);
        self.select_card(state, &mv.card_id);
        debug!(card_id = %mv.card_id, from = %mv.from, to = %mv.to, to_index = mv.to_index, "card moved");
        Some(mv)
    }
}
