//! Application state for the TUI
//!
//! Owns the wizard [`Model`] and the channel on which background suggestion
//! builders deliver their results.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use super::msg::Msg;
use super::update::{update, Cmd, Model};
use crate::budget::CharBudget;
use crate::config::Prefix;
use crate::git::Vcs;
use crate::suggest::{self, ScopeOrder};

/// Inputs for the background suggestion builders
pub struct SuggestionSources {
    pub staged_files: Vec<String>,
    pub scope_order: ScopeOrder,
    /// `-m` search term; empty means no message suggestions
    pub search_term: String,
    pub find_all: bool,
    pub vcs: Arc<dyn Vcs>,
}

/// Main application state
pub struct App {
    model: Model,
    suggestions_rx: Receiver<Msg>,
}

impl App {
    pub fn new(prefixes: Vec<Prefix>, budget: CharBudget, sources: SuggestionSources) -> Self {
        let (tx, rx) = mpsc::channel();
        spawn_suggestion_builders(tx, sources);
        Self::with_receiver(Model::new(prefixes, budget), rx)
    }

    /// Build an app around an existing channel (used by tests)
    pub fn with_receiver(model: Model, suggestions_rx: Receiver<Msg>) -> Self {
        Self {
            model,
            suggestions_rx,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    /// Run one message through `update`; returns true when the wizard is over
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let placeholder = Model::new(Vec::new(), CharBudget::default());
        let model = std::mem::replace(&mut self.model, placeholder);
        let (model, cmd) = update(msg, model);
        self.model = model;
        matches!(cmd, Cmd::Quit)
    }

    /// Size the prefix list to the terminal; crossterm only reports later resizes
    pub fn fit_to(&mut self, width: u16, height: u16) {
        self.dispatch(Msg::Resize(width, height));
    }

    /// Apply any suggestion sets that finished since the last tick
    pub fn drain_suggestions(&mut self) {
        while let Ok(msg) = self.suggestions_rx.try_recv() {
            self.dispatch(msg);
        }
    }
}

/// Build scope and message suggestions on worker threads.
///
/// Each builder sends exactly one `*SuggestionsReady` message. Failures are
/// logged and produce an empty set so the wizard never waits on them.
pub fn spawn_suggestion_builders(tx: Sender<Msg>, sources: SuggestionSources) {
    let SuggestionSources {
        staged_files,
        scope_order,
        search_term,
        find_all,
        vcs,
    } = sources;

    let scope_tx = tx.clone();
    thread::spawn(move || {
        let segments = suggest::path_segments(&staged_files, scope_order);
        tracing::debug!(count = segments.len(), "scope suggestions ready");
        let _ = scope_tx.send(Msg::ScopeSuggestionsReady(segments));
    });

    thread::spawn(move || {
        let messages = if search_term.is_empty() {
            Vec::new()
        } else {
            match vcs.search_commit_subjects(&search_term) {
                Ok(lines) => suggest::historical_messages(&lines, find_all),
                Err(e) => {
                    tracing::warn!(error = %e, "commit history search failed");
                    Vec::new()
                }
            }
        };
        tracing::debug!(count = messages.len(), "message suggestions ready");
        let _ = tx.send(Msg::MessageSuggestionsReady(messages));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_prefixes;
    use crate::error::GitError;
    use crate::git::CommitRequest;
    use std::path::PathBuf;
    use std::time::Duration;

    struct History(Result<Vec<String>, ()>);

    impl Vcs for History {
        fn staged_files(&self) -> Result<Vec<String>, GitError> {
            Ok(vec![])
        }
        fn repository_root(&self) -> Result<PathBuf, GitError> {
            Ok(PathBuf::from("/repo"))
        }
        fn search_commit_subjects(&self, _term: &str) -> Result<Vec<String>, GitError> {
            self.0
                .clone()
                .map_err(|_| GitError::CommandFailed("fatal: bad revision".into()))
        }
        fn commit(&self, _request: &CommitRequest) -> Result<(), GitError> {
            Ok(())
        }
    }

    fn collect(sources: SuggestionSources) -> (Vec<String>, Vec<String>) {
        let (tx, rx) = mpsc::channel();
        spawn_suggestion_builders(tx, sources);
        let mut scopes = None;
        let mut messages = None;
        for _ in 0..2 {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                Msg::ScopeSuggestionsReady(items) => scopes = Some(items),
                Msg::MessageSuggestionsReady(items) => messages = Some(items),
                other => panic!("unexpected {other:?}"),
            }
        }
        (scopes.unwrap(), messages.unwrap())
    }

    fn sources(term: &str, history: Result<Vec<String>, ()>) -> SuggestionSources {
        SuggestionSources {
            staged_files: vec!["src/tui/app.rs".into()],
            scope_order: ScopeOrder::Descending,
            search_term: term.into(),
            find_all: false,
            vcs: Arc::new(History(history)),
        }
    }

    #[test]
    fn test_builders_deliver_both_sets() {
        let (scopes, messages) = collect(sources(
            "health",
            Ok(vec!["feat(api): add health check".into()]),
        ));
        assert!(scopes.contains(&"src/tui".to_string()));
        assert_eq!(messages, vec!["add health check".to_string()]);
    }

    #[test]
    fn test_empty_term_skips_history() {
        let (_, messages) = collect(sources("", Ok(vec!["fix: x".into()])));
        assert!(messages.is_empty());
    }

    #[test]
    fn test_history_failure_yields_empty_set() {
        let (_, messages) = collect(sources("x", Err(())));
        assert!(messages.is_empty());
    }

    #[test]
    fn test_drain_applies_pending_messages() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::with_receiver(Model::new(default_prefixes(), CharBudget::default()), rx);
        tx.send(Msg::ScopeSuggestionsReady(vec!["api".into()])).unwrap();
        drop(tx);
        app.drain_suggestions();
        assert_eq!(app.model().scope_suggestions.as_ref().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_short_terminal_keeps_selection_visible() {
        let (_tx, rx) = mpsc::channel();
        let mut app = App::with_receiver(Model::new(default_prefixes(), CharBudget::default()), rx);
        app.fit_to(80, 8);
        assert_eq!(app.model().visible_items, 2);

        for _ in 0..3 {
            app.dispatch(Msg::MoveDown);
        }
        let model = app.model();
        assert_eq!(model.selected_index, 3);
        assert_eq!(model.scroll_offset, 2);
    }

    #[test]
    fn test_dispatch_reports_quit() {
        let (_tx, rx) = mpsc::channel();
        let mut app = App::with_receiver(Model::new(default_prefixes(), CharBudget::default()), rx);
        assert!(!app.dispatch(Msg::MoveDown));
        assert!(app.dispatch(Msg::Cancel));
    }
}
