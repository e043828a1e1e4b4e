//! Key classification and command application.
//!
//! `classify` is a pure function from a key event to a [`Command`]. The
//! [`Session`] owns the only mutable state: the buffer, the mode, and the
//! last result list.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::Deserialize;

use crate::buffer::{EditOutcome, QueryBuffer};
use crate::matcher::{Entry, Matcher};
use crate::mode::SearchMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveStart,
    MoveEnd,
    ToggleMode,
    Erase,
    Delete,
    Kill,
    Insert(char),
    Ignore,
}

/// What the Delete key does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeleteKey {
    /// Erase the character under the cursor.
    #[default]
    Forward,
    /// Erase the character before the cursor, same as backspace.
    Backward,
}

pub fn classify(key: &KeyEvent) -> Command {
    if key.kind != KeyEventKind::Press {
        return Command::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Home => Command::MoveStart,
        KeyCode::End => Command::MoveEnd,
        KeyCode::Backspace => Command::Erase,
        KeyCode::Delete => Command::Delete,
        KeyCode::Char(c) if ctrl && !alt => match c.to_ascii_lowercase() {
            'a' => Command::MoveStart,
            'e' => Command::MoveEnd,
            't' => Command::ToggleMode,
            'h' => Command::Erase,
            'k' => Command::Kill,
            _ => Command::Ignore,
        },
        KeyCode::Char(c) if !ctrl && !alt && crate::buffer::is_printable(c) => {
            Command::Insert(c)
        }
        _ => Command::Ignore,
    }
}

/// Ctrl-C, which raw mode delivers as a key instead of SIGINT.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.code == KeyCode::Char('c')
        && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub struct Session {
    pub buffer: QueryBuffer,
    pub mode: SearchMode,
    pub delete_key: DeleteKey,
    pub results: Vec<Entry>,
}

impl Session {
    pub fn new(capacity: usize, mode: SearchMode, delete_key: DeleteKey) -> Self {
        Self {
            buffer: QueryBuffer::new(capacity),
            mode,
            delete_key,
            results: Vec::new(),
        }
    }

    /// Apply `command`. Returns `None` when the command was ignored and no
    /// redraw is needed.
    pub fn apply(&mut self, command: Command) -> Option<EditOutcome> {
        let outcome = match command {
            Command::Ignore => return None,
            Command::MoveStart => self.buffer.move_to_start(),
            Command::MoveEnd => self.buffer.move_to_end(),
            Command::ToggleMode => {
                self.mode = self.mode.toggle();
                EditOutcome::Changed
            }
            Command::Erase => self.buffer.erase_before_cursor(),
            Command::Delete => match self.delete_key {
                DeleteKey::Forward => self.buffer.delete_at_cursor(),
                DeleteKey::Backward => self.buffer.erase_before_cursor(),
            },
            Command::Kill => self.buffer.kill_to_cursor(),
            Command::Insert(ch) => self.buffer.insert(ch),
        };
        match outcome {
            EditOutcome::Full => {
                tracing::debug!(
                    capacity = self.buffer.capacity(),
                    "query buffer full, dropped input"
                );
            }
            _ => {
                tracing::debug!(
                    ?command,
                    ?outcome,
                    cursor = self.buffer.cursor(),
                    len = self.buffer.len(),
                    "applied"
                );
            }
        }
        Some(outcome)
    }

    pub fn handle_key(&mut self, key: &KeyEvent, matcher: &dyn Matcher) -> bool {
        let command = classify(key);
        match self.apply(command) {
            Some(_) => {
                self.results = matcher.find(self.buffer.text(), self.mode);
                true
            }
            None => {
                tracing::trace!(code = ?key.code, modifiers = ?key.modifiers, "ignored key");
                false
            }
        }
    }
}
