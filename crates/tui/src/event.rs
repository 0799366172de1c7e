//! Event handling for the TUI.
//!
//! Provides keyboard event polling and handling.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::TuiResult;

/// Poll for keyboard events with a timeout.
///
/// Returns `Some(KeyEvent)` if a key was pressed within the timeout,
/// or `None` if no key was pressed.
pub fn poll_key(timeout: Duration) -> TuiResult<Option<KeyEvent>> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(Some(key));
    }
    Ok(None)
}

/// Check if the key event represents a quit command.
///
/// Returns `true` for 'q' key or Ctrl+C.
pub fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

/// Check if the key event is the down navigation key (j or Down arrow).
pub fn is_down(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Down,
            ..
        }
    )
}

/// Check if the key event is the up navigation key (k or Up arrow).
pub fn is_up(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('k'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Up,
            ..
        }
    )
}

/// Check if the key event is the left navigation key (h or Left arrow).
pub fn is_left(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Left,
            ..
        }
    )
}

/// Check if the key event is the right navigation key (l or Right arrow).
pub fn is_right(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('l'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Right,
            ..
        }
    )
}

/// Check if the key event is the Enter key.
pub fn is_enter(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Enter,
            ..
        }
    )
}

/// Check if the key event is the Escape key.
pub fn is_escape(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Esc,
            ..
        }
    )
}

/// Check if the key event is the refresh key (r).
pub fn is_refresh(key: &KeyEvent) -> bool {
    is_plain_char(key, 'r')
}

/// Check if the key event grabs the selected pill for a move (m).
pub fn is_grab_move(key: &KeyEvent) -> bool {
    is_plain_char(key, 'm')
}

/// Check if the key event grabs the selected pill's start handle (s).
pub fn is_grab_start(key: &KeyEvent) -> bool {
    is_plain_char(key, 's')
}

/// Check if the key event grabs the selected pill's end handle (e).
pub fn is_grab_end(key: &KeyEvent) -> bool {
    is_plain_char(key, 'e')
}

/// Check if the key event opens the assignment picker (a).
pub fn is_assign(key: &KeyEvent) -> bool {
    is_plain_char(key, 'a')
}

/// Check if the key event pages the course window back a year ([).
pub fn is_prev_year(key: &KeyEvent) -> bool {
    is_plain_char(key, '[')
}

/// Check if the key event pages the course window forward a year (]).
pub fn is_next_year(key: &KeyEvent) -> bool {
    is_plain_char(key, ']')
}

fn is_plain_char(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers == KeyModifiers::NONE
}
