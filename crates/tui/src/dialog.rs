//! Modal dialog state.
//!
//! The controllers ask their questions through
//! [`Interaction`](crate::provider::Interaction), which is synchronous. In
//! the terminal the question is a modal dialog instead: the app opens a
//! [`Dialog`] remembering what to do with the answer, collects keystrokes
//! over several frames, and replays the finished answer to the controller
//! as a [`PreparedAnswer`].

use trellis_protocol::{CardId, ColumnId, Path};

use crate::provider::PreparedAnswer;

/// What kind of answer the dialog collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogKind {
    /// Free text, seeded with a default.
    Prompt {
        /// Text typed so far.
        input: String,
    },
    /// Yes or no.
    Confirm,
}

/// The edit waiting on the dialog's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Add a child under the node at this path (empty path: a new root).
    AddChild(Path),
    /// Rename the node at this path.
    EditNode(Path),
    /// Delete the node at this path.
    DeleteNode(Path),
    /// Add a card to this column.
    AddCard(ColumnId),
    /// Rename this card.
    RenameCard(CardId),
}

/// An open modal dialog.
///
/// # Examples
///
/// ```
/// use trellis_tui::dialog::{Dialog, PendingAction};
/// use trellis_tui::provider::PreparedAnswer;
///
/// let mut dialog = Dialog::prompt("Card title?", None, PendingAction::AddCard("todo".into()));
/// dialog.input_char('h');
/// dialog.input_char('i');
///
/// let (action, answer) = dialog.answer(true);
/// assert_eq!(action, PendingAction::AddCard("todo".into()));
/// assert_eq!(answer, PreparedAnswer::Text("hi".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    /// Question shown to the user.
    pub message: String,
    /// Prompt or confirmation.
    pub kind: DialogKind,
    /// Edit to run once answered.
    pub action: PendingAction,
}

impl Dialog {
    /// Opens a text prompt, pre-filled with `default`.
    #[must_use]
    pub fn prompt(message: impl Into<String>, default: Option<&str>, action: PendingAction) -> Self {
        Self {
            message: message.into(),
            kind: DialogKind::Prompt {
                input: default.unwrap_or_default().to_string(),
            },
            action,
        }
    }

    /// Opens a yes/no confirmation.
    #[must_use]
    pub fn confirm(message: impl Into<String>, action: PendingAction) -> Self {
        Self {
            message: message.into(),
            kind: DialogKind::Confirm,
            action,
        }
    }

    /// Returns `true` for text prompts.
    #[must_use]
    pub fn is_prompt(&self) -> bool {
        matches!(self.kind, DialogKind::Prompt { .. })
    }

    /// Returns the text typed so far, for prompts.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        match &self.kind {
            DialogKind::Prompt { input } => Some(input),
            DialogKind::Confirm => None,
        }
    }

    /// Appends a character to a prompt's input.
    pub fn input_char(&mut self, ch: char) {
        if let DialogKind::Prompt { input } = &mut self.kind {
            input.push(ch);
        }
    }

    /// Removes the last character of a prompt's input.
    pub fn backspace(&mut self) {
        if let DialogKind::Prompt { input } = &mut self.kind {
            input.pop();
        }
    }

    /// Closes the dialog, returning the pending edit and the user's answer.
    ///
    /// `accepted` is `true` when the user pressed Enter (or `y`) and `false`
    /// when they dismissed the dialog.
    #[must_use]
    pub fn answer(self, accepted: bool) -> (PendingAction, PreparedAnswer) {
        let answer = match (self.kind, accepted) {
            (DialogKind::Prompt { input }, true) => PreparedAnswer::Text(input),
            (DialogKind::Prompt { .. }, false) => PreparedAnswer::Cancelled,
            (DialogKind::Confirm, true) => PreparedAnswer::Confirmed,
            (DialogKind::Confirm, false) => PreparedAnswer::Declined,
        };
        (self.action, answer)
    }
}
