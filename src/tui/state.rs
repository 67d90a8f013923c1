//! Pure state helpers for the wizard (Functional Core)
//!
//! List navigation, the prefix filter and the single-line text input used by
//! every free-text stage. Nothing here touches the terminal.

use crate::config::Prefix;

// =============================================================================
// Text input
// =============================================================================

/// Single-line text input with a character-indexed cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Cursor position in characters
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the value and put the cursor at the end
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

// =============================================================================
// Prefix filter
// =============================================================================

/// Case-insensitive subsequence match: every query character appears in
/// `candidate`, in order
pub fn fuzzy_match(candidate: &str, query: &str) -> bool {
    let mut haystack = candidate.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|q| haystack.any(|c| c == q))
}

/// Indices of prefixes whose title matches `query`, in configured order
pub fn filter_prefixes(prefixes: &[Prefix], query: &str) -> Vec<usize> {
    prefixes
        .iter()
        .enumerate()
        .filter(|(_, p)| fuzzy_match(&p.title, query))
        .map(|(i, _)| i)
        .collect()
}

// =============================================================================
// Navigation - Pure index calculations
// =============================================================================

/// Calculate new selected index after moving up
pub fn move_selection_up(current: usize) -> usize {
    current.saturating_sub(1)
}

/// Calculate new selected index after moving down
pub fn move_selection_down(current: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        (current + 1).min(max - 1)
    }
}

/// Clamp selection index to valid range
pub fn clamp_selection(selected: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        selected.min(max - 1)
    }
}

/// Calculate scroll offset to keep selection visible
pub fn calculate_scroll_offset(
    selected: usize,
    current_offset: usize,
    visible_items: usize,
) -> usize {
    if visible_items == 0 {
        return 0;
    }
    if selected < current_offset {
        selected
    } else if selected >= current_offset + visible_items {
        selected.saturating_sub(visible_items - 1)
    } else {
        current_offset
    }
}

/// Map a digit key to a list index.
///
/// `1`-`9` pick the first through ninth candidate when it exists. `0` picks the
/// tenth only when exactly ten candidates are listed.
pub fn digit_to_index(digit: u8, item_count: usize) -> Option<usize> {
    let index = match digit {
        0 if item_count == 10 => 9,
        0 => return None,
        d @ 1..=9 => usize::from(d) - 1,
        _ => return None,
    };
    (index < item_count).then_some(index)
}
