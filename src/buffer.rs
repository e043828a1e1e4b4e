use tui_input::{Input, InputRequest};

pub const DEFAULT_CAPACITY: usize = 128;

/// Result of a single edit against the query buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    /// The edit was valid but had nothing to do (erase at 0, kill at end).
    Unchanged,
    /// The buffer is at capacity; the character was dropped.
    Full,
    /// The character is outside the printable ASCII range.
    Rejected,
}

/// The in-progress query and its cursor.
///
/// `0 <= cursor <= len() <= capacity` holds after every operation. Only
/// printable ASCII is stored, so byte offsets and character offsets agree.
#[derive(Clone, Debug)]
pub struct QueryBuffer {
    input: Input,
    capacity: usize,
}

impl QueryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            input: Input::default(),
            capacity,
        }
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn len(&self) -> usize {
        self.input.value().len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Insert `ch` at the cursor, shifting the tail right.
    pub fn insert(&mut self, ch: char) -> EditOutcome {
        if !is_printable(ch) {
            return EditOutcome::Rejected;
        }
        if self.is_full() {
            return EditOutcome::Full;
        }
        self.request(InputRequest::InsertChar(ch))
    }

    /// Erase the character before the cursor (backspace).
    pub fn erase_before_cursor(&mut self) -> EditOutcome {
        if self.cursor() == 0 {
            return EditOutcome::Unchanged;
        }
        self.request(InputRequest::DeletePrevChar)
    }

    /// Erase the character under the cursor; the cursor stays put.
    pub fn delete_at_cursor(&mut self) -> EditOutcome {
        if self.cursor() >= self.len() {
            return EditOutcome::Unchanged;
        }
        self.request(InputRequest::DeleteNextChar)
    }

    pub fn move_to_start(&mut self) -> EditOutcome {
        self.request(InputRequest::GoToStart)
    }

    pub fn move_to_end(&mut self) -> EditOutcome {
        self.request(InputRequest::GoToEnd)
    }

    /// Drop everything from the cursor to the end.
    pub fn kill_to_cursor(&mut self) -> EditOutcome {
        if self.cursor() == self.len() {
            return EditOutcome::Unchanged;
        }
        self.request(InputRequest::DeleteTillEnd)
    }

    /// Columns the text must scroll so the cursor fits in `width` columns.
    pub fn visual_scroll(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        self.input.visual_scroll(width - 1)
    }

    fn request(&mut self, request: InputRequest) -> EditOutcome {
        match self.input.handle(request) {
            Some(_) => EditOutcome::Changed,
            None => EditOutcome::Unchanged,
        }
    }
}

impl PartialEq for QueryBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
            && self.cursor() == other.cursor()
            && self.capacity == other.capacity
    }
}

impl Eq for QueryBuffer {}

impl Default for QueryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

pub fn is_printable(ch: char) -> bool {
    matches!(ch, ' '..='~')
}
