//! TEA Message Types for the wizard
//!
//! Messages describe what happened (a key was pressed, suggestions arrived,
//! the terminal was resized). They are the only way to drive the wizard and
//! are processed by the single `update` function.

use crossterm::event::{KeyCode, KeyModifiers};

/// All possible messages/actions in the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    // === Prefix list ===
    /// Move selection up by one
    MoveUp,
    /// Move selection down by one
    MoveDown,
    /// Jump to first candidate
    JumpToTop,
    /// Jump to last candidate
    JumpToBottom,
    /// Direct selection with a digit key (`1`-`9`, `0` for the tenth)
    SelectDigit(u8),

    // === Prefix filter ===
    /// Open the fuzzy filter input
    StartFilter,
    /// Add character to the filter
    FilterInput(char),
    /// Remove character from the filter
    FilterBackspace,
    /// Keep the filter and return to list navigation
    ApplyFilter,
    /// Drop the filter and show every candidate
    ClearFilter,

    // === Text fields ===
    /// Type a character into the active field
    Input(char),
    /// Delete the character before the cursor
    Backspace,
    /// Delete the character under the cursor
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Replace the field with the next suggestion (Tab)
    Cycle,

    // === Stage control ===
    /// Finalize the current stage
    Confirm,
    /// Abort the whole session
    Cancel,

    // === Background work ===
    /// Path-segment suggestions are ready
    ScopeSuggestionsReady(Vec<String>),
    /// Historical message suggestions are ready
    MessageSuggestionsReady(Vec<String>),

    // === Lifecycle ===
    /// Window resized
    Resize(u16, u16),
    /// No operation (for unhandled keys)
    Noop,
}

/// Which key map applies to the current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Navigating the prefix list
    PrefixList,
    /// Navigating a filtered prefix list; Esc drops the filter
    FilteredPrefixList,
    /// Typing into the prefix filter
    PrefixFilter,
    /// Scope or subject input, where Tab cycles suggestions
    SuggestedField,
    /// Body confirmation input
    PlainField,
    /// Wizard has ended; keys are ignored
    Finished,
}

/// Convert a key event to a message
///
/// This is a pure function - no side effects, just pattern matching.
pub fn key_to_msg(code: KeyCode, modifiers: KeyModifiers, context: KeyContext) -> Msg {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C aborts from anywhere
    if ctrl && code == KeyCode::Char('c') {
        return Msg::Cancel;
    }

    match context {
        KeyContext::Finished => Msg::Noop,

        KeyContext::PrefixFilter => match code {
            KeyCode::Enter => Msg::ApplyFilter,
            KeyCode::Esc => Msg::ClearFilter,
            KeyCode::Backspace => Msg::FilterBackspace,
            KeyCode::Up => Msg::MoveUp,
            KeyCode::Down => Msg::MoveDown,
            KeyCode::Char(c) if !ctrl => Msg::FilterInput(c),
            _ => Msg::Noop,
        },

        KeyContext::PrefixList | KeyContext::FilteredPrefixList => match code {
            KeyCode::Esc if context == KeyContext::FilteredPrefixList => Msg::ClearFilter,
            KeyCode::Char('q') | KeyCode::Esc => Msg::Cancel,
            KeyCode::Char('j') | KeyCode::Down => Msg::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Msg::MoveUp,
            KeyCode::Char('g') | KeyCode::Home => Msg::JumpToTop,
            KeyCode::Char('G') | KeyCode::End => Msg::JumpToBottom,
            KeyCode::Char('/') => Msg::StartFilter,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                Msg::SelectDigit(c.to_digit(10).unwrap_or_default() as u8)
            }
            KeyCode::Enter => Msg::Confirm,
            _ => Msg::Noop,
        },

        KeyContext::SuggestedField | KeyContext::PlainField => match code {
            KeyCode::Esc => Msg::Cancel,
            KeyCode::Enter => Msg::Confirm,
            KeyCode::Tab if context == KeyContext::SuggestedField => Msg::Cycle,
            KeyCode::Backspace => Msg::Backspace,
            KeyCode::Delete => Msg::Delete,
            KeyCode::Left => Msg::CursorLeft,
            KeyCode::Right => Msg::CursorRight,
            KeyCode::Home => Msg::CursorHome,
            KeyCode::End => Msg::CursorEnd,
            KeyCode::Char('a') if ctrl => Msg::CursorHome,
            KeyCode::Char('e') if ctrl => Msg::CursorEnd,
            KeyCode::Char(c) if !ctrl => Msg::Input(c),
            _ => Msg::Noop,
        },
    }
}

/// Check if a message should end the wizard without a result
pub fn is_cancel(msg: &Msg) -> bool {
    matches!(msg, Msg::Cancel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, context: KeyContext) -> Msg {
        key_to_msg(code, KeyModifiers::NONE, context)
    }

    #[test]
    fn test_ctrl_c_cancels_everywhere() {
        for context in [
            KeyContext::PrefixList,
            KeyContext::FilteredPrefixList,
            KeyContext::PrefixFilter,
            KeyContext::SuggestedField,
            KeyContext::PlainField,
        ] {
            assert_eq!(
                key_to_msg(KeyCode::Char('c'), KeyModifiers::CONTROL, context),
                Msg::Cancel
            );
        }
    }

    #[test]
    fn test_prefix_list_keys() {
        let ctx = KeyContext::PrefixList;
        assert_eq!(key(KeyCode::Char('j'), ctx), Msg::MoveDown);
        assert_eq!(key(KeyCode::Up, ctx), Msg::MoveUp);
        assert_eq!(key(KeyCode::Char('3'), ctx), Msg::SelectDigit(3));
        assert_eq!(key(KeyCode::Char('0'), ctx), Msg::SelectDigit(0));
        assert_eq!(key(KeyCode::Char('/'), ctx), Msg::StartFilter);
        assert_eq!(key(KeyCode::Enter, ctx), Msg::Confirm);
        assert_eq!(key(KeyCode::Esc, ctx), Msg::Cancel);
        assert_eq!(key(KeyCode::Char('q'), ctx), Msg::Cancel);
        assert_eq!(key(KeyCode::Char('z'), ctx), Msg::Noop);
    }

    #[test]
    fn test_esc_clears_applied_filter() {
        assert_eq!(key(KeyCode::Esc, KeyContext::FilteredPrefixList), Msg::ClearFilter);
        assert_eq!(key(KeyCode::Char('q'), KeyContext::FilteredPrefixList), Msg::Cancel);
        assert_eq!(key(KeyCode::Char('2'), KeyContext::FilteredPrefixList), Msg::SelectDigit(2));
    }

    #[test]
    fn test_filter_keys_type_digits() {
        let ctx = KeyContext::PrefixFilter;
        assert_eq!(key(KeyCode::Char('1'), ctx), Msg::FilterInput('1'));
        assert_eq!(key(KeyCode::Char('q'), ctx), Msg::FilterInput('q'));
        assert_eq!(key(KeyCode::Enter, ctx), Msg::ApplyFilter);
        assert_eq!(key(KeyCode::Esc, ctx), Msg::ClearFilter);
        assert_eq!(key(KeyCode::Backspace, ctx), Msg::FilterBackspace);
    }

    #[test]
    fn test_field_keys() {
        let ctx = KeyContext::SuggestedField;
        assert_eq!(key(KeyCode::Tab, ctx), Msg::Cycle);
        assert_eq!(key(KeyCode::Char('q'), ctx), Msg::Input('q'));
        assert_eq!(key(KeyCode::Enter, ctx), Msg::Confirm);
        assert_eq!(key(KeyCode::Esc, ctx), Msg::Cancel);
        assert_eq!(key(KeyCode::Left, ctx), Msg::CursorLeft);
        assert_eq!(
            key_to_msg(KeyCode::Char('a'), KeyModifiers::CONTROL, ctx),
            Msg::CursorHome
        );
    }

    #[test]
    fn test_plain_field_has_no_cycle() {
        assert_eq!(key(KeyCode::Tab, KeyContext::PlainField), Msg::Noop);
        assert_eq!(key(KeyCode::Char('y'), KeyContext::PlainField), Msg::Input('y'));
    }

    #[test]
    fn test_finished_ignores_keys() {
        assert_eq!(key(KeyCode::Enter, KeyContext::Finished), Msg::Noop);
    }

    #[test]
    fn test_is_cancel() {
        assert!(is_cancel(&Msg::Cancel));
        assert!(!is_cancel(&Msg::Confirm));
    }
}
