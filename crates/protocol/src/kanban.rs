//! Kanban board state and its transforms.
//!
//! A [`KanbanState`] stores cards by id, columns by id, and the display
//! order of the columns. Columns only hold card ids; the card contents live
//! in [`KanbanState::cards`].
//!
//! Like the forest engine, every transform borrows the current state and
//! returns the next one. Addressing misses (unknown card or column) return
//! an unchanged copy instead of failing.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drag::CardMove;
use crate::error::{ProtocolError, Result};
use crate::id::{CARD_PREFIX, uid};

/// Identifier of a card.
pub type CardId = String;

/// Identifier of a column.
pub type ColumnId = String;

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card.
    pub id: CardId,
    /// Text shown on the card.
    pub title: String,
}

impl Card {
    /// Creates a card with a freshly minted id.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_protocol::Card;
    ///
    /// let card = Card::new("Write docs");
    /// assert!(card.id.starts_with("card_"));
    /// ```
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uid(CARD_PREFIX),
            title: title.into(),
        }
    }
}

/// A column (lane) of the board, holding an ordered list of card ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier for this column.
    pub id: ColumnId,
    /// Header text.
    pub title: String,
    /// Cards in this column, top to bottom.
    pub card_ids: Vec<CardId>,
}

impl Column {
    /// Creates an empty column.
    #[must_use]
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            card_ids: Vec::new(),
        }
    }

    /// Returns the number of cards in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.card_ids.len()
    }

    /// Returns `true` if the column holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card_ids.is_empty()
    }

    /// Returns the position of a card within this column.
    #[must_use]
    pub fn position_of(&self, card_id: &str) -> Option<usize> {
        self.card_ids.iter().position(|id| id == card_id)
    }
}

/// The whole board.
///
/// Invariants (checked by [`validate`](Self::validate)):
///
/// - every id listed in a column exists in `cards`;
/// - every card is listed in exactly one column;
/// - `column_order` lists every column exactly once.
///
/// # Examples
///
/// ```
/// use trellis_protocol::{Column, KanbanState};
///
/// let state = KanbanState::with_columns(vec![
///     Column::new("todo", "Todo"),
///     Column::new("done", "Done"),
/// ]);
/// let state = state.add_card("todo", "Ship it");
///
/// assert_eq!(state.card_count(), 1);
/// assert_eq!(state.column("todo").unwrap().len(), 1);
/// assert!(state.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanState {
    /// Card contents by id.
    pub cards: BTreeMap<CardId, Card>,
    /// Columns by id.
    pub columns: BTreeMap<ColumnId, Column>,
    /// Display order of the columns, left to right.
    pub column_order: Vec<ColumnId>,
}

impl KanbanState {
    /// Creates a board with the given columns, in display order.
    ///
    /// Cards already referenced by the columns are not created; use
    /// [`add_card`](Self::add_card) or fill [`cards`](Self::cards) directly.
    #[must_use]
    pub fn with_columns(columns: Vec<Column>) -> Self {
        let column_order = columns.iter().map(|c| c.id.clone()).collect();
        let columns = columns.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self {
            cards: BTreeMap::new(),
            columns,
            column_order,
        }
    }

    /// Returns the column with the given id.
    #[must_use]
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.get(id)
    }

    /// Returns the card with the given id.
    #[must_use]
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Iterates over the columns in display order.
    ///
    /// Ids in `column_order` without a matching column are skipped.
    pub fn columns_in_order(&self) -> impl Iterator<Item = &Column> {
        self.column_order.iter().filter_map(|id| self.columns.get(id))
    }

    /// Returns the total number of cards.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Returns the id of the column currently holding `card_id`.
    #[must_use]
    pub fn column_of(&self, card_id: &str) -> Option<&ColumnId> {
        self.columns_in_order()
            .find(|column| column.position_of(card_id).is_some())
            .map(|column| &column.id)
    }

    /// Adds a new card with a fresh id at the bottom of `column_id`.
    ///
    /// Unknown columns leave the board unchanged.
    #[must_use]
    pub fn add_card(&self, column_id: &str, title: impl Into<String>) -> Self {
        if !self.columns.contains_key(column_id) {
            debug!(column_id, "add_card: unknown column");
            return self.clone();
        }

        let card = Card::new(title);
        let mut next = self.clone();
        if let Some(column) = next.columns.get_mut(column_id) {
            column.card_ids.push(card.id.clone());
        }
        next.cards.insert(card.id.clone(), card);
        next
    }

    /// Removes a card from `cards` and from every column.
    ///
    /// Deleting an id that is not present is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_protocol::dummy::initial_kanban;
    ///
    /// let state = initial_kanban();
    /// let id = state.column("done").unwrap().card_ids[0].clone();
    ///
    /// let state = state.delete_card(&id);
    /// assert!(state.card(&id).is_none());
    /// assert!(state.column("done").unwrap().is_empty());
    /// ```
    #[must_use]
    pub fn delete_card(&self, card_id: &str) -> Self {
        let mut next = self.clone();
        next.cards.remove(card_id);
        for column in next.columns.values_mut() {
            column.card_ids.retain(|id| id != card_id);
        }
        next
    }

    /// Replaces the title of an existing card.
    ///
    /// Renaming an unknown card leaves the board unchanged; it never creates
    /// a card.
    #[must_use]
    pub fn rename_card(&self, card_id: &str, title: impl Into<String>) -> Self {
        let mut next = self.clone();
        match next.cards.get_mut(card_id) {
            Some(card) => card.title = title.into(),
            None => debug!(card_id, "rename_card: unknown card"),
        }
        next
    }

    /// Moves a card out of `from` and into `to` at `to_index`.
    ///
    /// `to_index` is clamped to the length of the destination after the card
    /// has been taken out, so the same call covers reordering within a
    /// column and moving between columns. The caller is trusted to name the
    /// column that currently holds the card. Unknown columns or cards leave
    /// the board unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_protocol::{Column, KanbanState};
    ///
    /// let state = KanbanState::with_columns(vec![Column::new("a", "A"), Column::new("b", "B")]);
    /// let state = state.add_card("a", "one");
    /// let id = state.column("a").unwrap().card_ids[0].clone();
    ///
    /// let state = state.move_card("a", "b", &id, 10);
    /// assert!(state.column("a").unwrap().is_empty());
    /// assert_eq!(state.column("b").unwrap().card_ids, vec![id]);
    /// ```
    #[must_use]
    pub fn move_card(&self, from: &str, to: &str, card_id: &str, to_index: usize) -> Self {
        if !self.cards.contains_key(card_id)
            || !self.columns.contains_key(from)
            || !self.columns.contains_key(to)
        {
            debug!(from, to, card_id, "move_card: unknown card or column");
            return self.clone();
        }

        let mut next = self.clone();
        if let Some(column) = next.columns.get_mut(from) {
            column.card_ids.retain(|id| id != card_id);
        }
        if let Some(column) = next.columns.get_mut(to) {
            let at = to_index.min(column.card_ids.len());
            column.card_ids.insert(at, card_id.to_string());
        }
        next
    }

    /// Applies a resolved drag-and-drop move.
    #[must_use]
    pub fn apply_move(&self, mv: &CardMove) -> Self {
        self.move_card(&mv.from, &mv.to, &mv.card_id, mv.to_index)
    }

    /// Checks the board invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::BrokenInvariant`] describing the first
    /// violation found.
    pub fn validate(&self) -> Result<()> {
        let ordered: HashSet<&str> = self.column_order.iter().map(String::as_str).collect();
        if ordered.len() != self.column_order.len() {
            return Err(broken("column order lists a column twice"));
        }
        if let Some(id) = self.columns.keys().find(|id| !ordered.contains(id.as_str())) {
            return Err(broken(format!("column {id} is missing from the column order")));
        }
        if let Some(id) = self.column_order.iter().find(|id| !self.columns.contains_key(*id)) {
            return Err(broken(format!("column order names unknown column {id}")));
        }

        let mut placed: HashSet<&str> = HashSet::new();
        for column in self.columns.values() {
            if column.id.is_empty() {
                return Err(broken("column with an empty id"));
            }
            for card_id in &column.card_ids {
                if !self.cards.contains_key(card_id) {
                    return Err(broken(format!(
                        "column {} lists unknown card {card_id}",
                        column.id
                    )));
                }
                if !placed.insert(card_id) {
                    return Err(broken(format!("card {card_id} is listed more than once")));
                }
            }
        }
        if let Some(id) = self.cards.keys().find(|id| !placed.contains(id.as_str())) {
            return Err(broken(format!("card {id} is not in any column")));
        }
        Ok(())
    }

    /// Parses a board from JSON and checks its invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the board is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: Self = serde_json::from_str(json).map_err(ProtocolError::DeserializationFailed)?;
        state.validate()?;
        Ok(state)
    }

    /// Serializes the board to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(ProtocolError::SerializationFailed)
    }
}

fn broken(reason: impl Into<String>) -> ProtocolError {
    ProtocolError::BrokenInvariant(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::initial_kanban;

    fn ids(state: &KanbanState, column: &str) -> Vec<String> {
        state.column(column).expect("column").card_ids.clone()
    }

    #[test]
    fn seed_move_todo_to_done() {
        let state = initial_kanban();
        let todo = ids(&state, "todo");
        let done = ids(&state, "done");
        let c1 = todo[0].clone();

        let next = state.move_card("todo", "done", &c1, 0);

        assert_eq!(ids(&next, "todo"), todo[1..].to_vec());
        assert_eq!(ids(&next, "done"), vec![c1, done[0].clone()]);
        assert_eq!(next.cards, state.cards);
        assert!(next.validate().is_ok());
    }

    #[test]
    fn move_within_column_reorders() {
        let state = initial_kanban();
        let todo = ids(&state, "todo");

        let next = state.move_card("todo", "todo", &todo[0], 2);
        assert_eq!(
            ids(&next, "todo"),
            vec![todo[1].clone(), todo[2].clone(), todo[0].clone()]
        );
    }

    #[test]
    fn move_clamps_index() {
        let state = initial_kanban();
        let c1 = ids(&state, "todo")[0].clone();

        let next = state.move_card("todo", "inprogress", &c1, 42);
        assert_eq!(ids(&next, "inprogress").last(), Some(&c1));
    }

    #[test]
    fn move_with_unknown_column_is_noop() {
        let state = initial_kanban();
        let c1 = ids(&state, "todo")[0].clone();

        assert_eq!(state.move_card("todo", "nowhere", &c1, 0), state);
        assert_eq!(state.move_card("nowhere", "done", &c1, 0), state);
        assert_eq!(state.move_card("todo", "done", "card_missing", 0), state);
    }

    #[test]
    fn add_card_appends_to_column() {
        let state = initial_kanban();
        let next = state.add_card("inprogress", "New work");

        let column = ids(&next, "inprogress");
        assert_eq!(column.len(), 3);
        let card = next.card(&column[2]).expect("card");
        assert_eq!(card.title, "New work");
        assert_eq!(next.card_count(), state.card_count() + 1);
        assert!(next.validate().is_ok());
    }

    #[test]
    fn add_card_unknown_column_is_noop() {
        let state = initial_kanban();
        assert_eq!(state.add_card("backlog", "x"), state);
    }

    #[test]
    fn delete_card_removes_everywhere() {
        let state = initial_kanban();
        let c4 = ids(&state, "inprogress")[0].clone();

        let next = state.delete_card(&c4);

        assert!(next.card(&c4).is_none());
        assert!(next.columns.values().all(|c| c.position_of(&c4).is_none()));
        assert!(next.validate().is_ok());
    }

    #[test]
    fn delete_card_scrubs_duplicate_listings() {
        let mut state = initial_kanban();
        let c1 = ids(&state, "todo")[0].clone();
        state
            .columns
            .get_mut("done")
            .expect("done")
            .card_ids
            .push(c1.clone());

        let next = state.delete_card(&c1);
        assert!(next.columns.values().all(|c| c.position_of(&c1).is_none()));
    }

    #[test]
    fn delete_absent_card_is_noop() {
        let state = initial_kanban();
        assert_eq!(state.delete_card("card_missing"), state);
    }

    #[test]
    fn rename_card_changes_title_only() {
        let state = initial_kanban();
        let c6 = ids(&state, "done")[0].clone();

        let next = state.rename_card(&c6, "Renamed");
        assert_eq!(next.card(&c6).unwrap().title, "Renamed");
        assert_eq!(next.card(&c6).unwrap().id, c6);
        assert_eq!(next.columns, state.columns);
    }

    #[test]
    fn rename_unknown_card_does_not_create() {
        let state = initial_kanban();
        let next = state.rename_card("card_missing", "Ghost");
        assert!(next.card("card_missing").is_none());
        assert_eq!(next, state);
    }

    #[test]
    fn column_of_finds_owner() {
        let state = initial_kanban();
        let c5 = ids(&state, "inprogress")[1].clone();
        assert_eq!(state.column_of(&c5).map(String::as_str), Some("inprogress"));
        assert!(state.column_of("card_missing").is_none());
    }

    #[test]
    fn columns_in_order_follows_order() {
        let state = initial_kanban();
        let titles: Vec<_> = state.columns_in_order().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["Todo", "In Progress", "Done"]);
    }

    #[test]
    fn validate_reports_violations() {
        let state = initial_kanban();

        let mut orphan = state.clone();
        orphan.cards.insert("card_x".into(), Card::new("x"));
        assert!(orphan.validate().is_err());

        let mut dangling = state.clone();
        dangling
            .columns
            .get_mut("todo")
            .unwrap()
            .card_ids
            .push("card_ghost".into());
        assert!(dangling.validate().is_err());

        let mut missing_order = state.clone();
        missing_order.column_order.pop();
        assert!(missing_order.validate().is_err());

        let mut twice = state.clone();
        twice.column_order.push("todo".into());
        assert!(twice.validate().is_err());
    }

    #[test]
    fn json_round_trip_uses_camel_case() {
        let state = initial_kanban();
        let json = state.to_json().expect("serialize");
        assert!(json.contains("\"columnOrder\""));
        assert!(json.contains("\"cardIds\""));

        let parsed = KanbanState::from_json(&json).expect("parse");
        assert_eq!(parsed, state);
    }

    #[test]
    fn from_json_rejects_invalid_board() {
        let json = r#"{
            "cards": {},
            "columns": {"todo": {"id": "todo", "title": "Todo", "cardIds": ["c1"]}},
            "columnOrder": ["todo"]
        }"#;
        let err = KanbanState::from_json(json).unwrap_err();
        assert!(matches!(err, ProtocolError::BrokenInvariant(_)));
    }
}
