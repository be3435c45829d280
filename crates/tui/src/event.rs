//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use trellis_protocol::Message;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts a terminal event to an application message.
///
/// `dialog` describes the open dialog, if any: `Some(true)` for a text
/// prompt, `Some(false)` for a yes/no confirmation. While a dialog is open
/// every key goes to it.
#[must_use]
pub fn event_to_message(event: &Event, dialog: Option<bool>) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match dialog {
            Some(is_prompt) => key_to_dialog_message(*key, is_prompt),
            None => key_to_message(*key),
        },
        _ => None,
    }
}

/// Converts a terminal key event to an application message.
///
/// Returns `Some(Message)` if the key event maps to an action,
/// or `None` if the key is not bound.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Escape (cancel drag or close help) |
/// | Arrows | Navigate |
/// | `Space` | Expand or collapse |
/// | `m` | Grab the selected item |
/// | `Enter` | Drop the grabbed item here |
/// | `Alt+Enter` | Drop across levels |
/// | `a` | Add |
/// | `e` | Edit |
/// | `d` or `Delete` | Delete |
/// | `Tab` | Switch tab |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),

        KeyCode::Char(' ') => Some(Message::ToggleExpand),
        KeyCode::Enter => Some(Message::Drop {
            cross_level: key.modifiers.contains(KeyModifiers::ALT),
        }),
        KeyCode::Char('m') => Some(Message::Grab),

        KeyCode::Char('a') => Some(Message::AddItem),
        KeyCode::Char('e') => Some(Message::EditItem),
        KeyCode::Char('d') | KeyCode::Delete => Some(Message::DeleteItem),

        KeyCode::Tab => Some(Message::SwitchTab),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts a key event to a dialog message.
///
/// # Key Bindings (Dialog Mode)
///
/// | Key | Prompt | Confirmation |
/// |-----|--------|--------------|
/// | `Enter` | Accept | Yes |
/// | `Esc` | Cancel | No |
/// | `y` | Input | Yes |
/// | `n` | Input | No |
/// | `Backspace` | Delete char | - |
/// | Any char | Input | - |
#[must_use]
pub fn key_to_dialog_message(key: KeyEvent, is_prompt: bool) -> Option<Message> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Message::Quit);
    }

    if is_prompt {
        match key.code {
            KeyCode::Enter => Some(Message::DialogConfirm),
            KeyCode::Esc => Some(Message::DialogCancel),
            KeyCode::Backspace => Some(Message::DialogBackspace),
            KeyCode::Char(ch) => Some(Message::DialogInput { ch }),
            _ => None,
        }
    } else {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y' | 'Y') => Some(Message::DialogConfirm),
            KeyCode::Esc | KeyCode::Char('n' | 'N') => Some(Message::DialogCancel),
            _ => None,
        }
    }
}
