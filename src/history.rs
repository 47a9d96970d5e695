//! Linear undo/redo history.
//!
//! Entries live in `[0, len)`; the cursor points at the entry currently shown, or at nothing
//! when the blank initial state is shown. Recording after an undo truncates the redo tail.

/// Where the cursor landed after an [`History::undo`] / [`History::redo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step<'a, T> {
    /// The cursor now points at this entry.
    Show(&'a T),
    /// The cursor moved before the first entry; show the blank initial state.
    Blank,
}

#[derive(Clone, Debug)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the shown entry; `None` for the blank initial state.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor as a signed index where `-1` is the blank initial state.
    pub fn position(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.next_index() < self.entries.len()
    }

    /// Store `entry` right after the cursor and make it current, dropping any redo tail.
    pub fn record(&mut self, entry: T) {
        let at = self.next_index();
        self.entries.truncate(at);
        self.entries.push(entry);
        self.cursor = Some(at);
    }

    /// Move the cursor back one entry. Returns `None` when already at the blank state.
    pub fn undo(&mut self) -> Option<Step<'_, T>> {
        let cur = self.cursor?;
        self.cursor = cur.checked_sub(1);
        Some(match self.cursor {
            Some(c) => Step::Show(&self.entries[c]),
            None => Step::Blank,
        })
    }

    /// Move the cursor forward one entry. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.next_index();
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        Some(&self.entries[next])
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }
}
