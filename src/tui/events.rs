//! Event handling for the TUI
//!
//! Translates terminal events into wizard messages using the key map of the
//! current stage.

use crossterm::event::{Event, KeyEvent, KeyEventKind};

use super::app::App;
use super::msg::{key_to_msg, Msg};

/// Convert a terminal event into a message, if it carries one
pub fn event_to_msg(app: &App, event: Event) -> Option<Msg> {
    match event {
        Event::Key(key) => key_event_to_msg(app, key),
        Event::Resize(width, height) => Some(Msg::Resize(width, height)),
        _ => None,
    }
}

fn key_event_to_msg(app: &App, key: KeyEvent) -> Option<Msg> {
    // Windows reports both press and release
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key_to_msg(key.code, key.modifiers, app.model().key_context()) {
        Msg::Noop => None,
        msg => Some(msg),
    }
}

/// Handle a terminal event, returns true if the wizard is over
pub fn handle_event(app: &mut App, event: Event) -> bool {
    match event_to_msg(app, event) {
        Some(msg) => app.dispatch(msg),
        None => false,
    }
}
