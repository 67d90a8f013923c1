//! Terminal wizard for composing a commit message
//!
//! Built on The Elm Architecture:
//! - `msg`: what happened
//! - `update`: the pure state machine
//! - `state`: pure helpers for lists and text input
//! - `app`, `events`, `ui`: the imperative shell

pub mod app;
pub mod events;
pub mod msg; // TEA message types (what happened)
pub mod state; // Pure state transformations (functional core)
pub mod ui;
pub mod update; // TEA update function (state transitions)

use std::io;
use std::time::Duration;

use crossterm::{
    event::{poll, read},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, size, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::prelude::*;

use crate::budget::CharBudget;
use crate::config::Prefix;
use app::{App, SuggestionSources};
use events::handle_event;
use update::Model;

/// Run the wizard and return its final model
pub fn run(
    prefixes: Vec<Prefix>,
    budget: CharBudget,
    sources: SuggestionSources,
) -> io::Result<Model> {
    let mut app = App::new(prefixes, budget, sources);
    let (width, height) = size()?;
    app.fit_to(width, height);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app, ensuring cleanup happens even on error
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal - this MUST run even if the wizard fails
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result?;
    let model = app.into_model();
    print_transcript(&model);
    Ok(model)
}

fn run_event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui::draw(f, app.model()))?;

        if poll(tick_rate)? && handle_event(app, read()?) {
            return Ok(());
        }

        // Suggestions finished in the background (non-blocking)
        app.drain_suggestions();
    }
}

/// Leave the answers on the normal screen once the alternate one is gone
fn print_transcript(model: &Model) {
    for (question, answer) in &model.transcript {
        println!("✔ {question} {answer}");
    }
}
