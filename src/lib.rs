//! Comet - interactive conventional-commit composer
//!
//! Pick a prefix, type a scope and a message, then hand the result to
//! `git commit`.
//!
//! # Overview
//!
//! A session is a short terminal wizard. Scope suggestions come from the
//! paths of the staged files and message suggestions from the commit history,
//! both built in the background while the user is still choosing a prefix.
//! An optional runtime tracker records how long sessions take.
//!
//! # Message shape
//!
//! | Scope | Result |
//! |-------|--------|
//! | empty | `feat: add health check` |
//! | `api` | `feat(api): add health check` |
//!
//! # Quick Start
//!
//! ```
//! use comet::tui::msg::Msg;
//! use comet::tui::update::{update, Model};
//! use comet::{config::default_prefixes, CharBudget};
//!
//! let mut model = Model::new(default_prefixes(), CharBudget::default());
//! let mut msgs = vec![Msg::SelectDigit(1)];
//! msgs.extend("api".chars().map(Msg::Input));
//! msgs.push(Msg::Confirm);
//! msgs.extend("add health check".chars().map(Msg::Input));
//! msgs.extend([Msg::Confirm, Msg::Confirm]);
//! for msg in msgs {
//!     model = update(msg, model).0;
//! }
//! assert_eq!(model.composed().unwrap().message, "feat(api): add health check");
//! ```

pub mod budget;
pub mod config;
pub mod error;
pub mod git;
pub mod session;
pub mod suggest;
pub mod tracker;
pub mod tui;

pub use budget::{Allowance, CharBudget, Counter};
pub use config::{Config, Prefix};
pub use error::{ConfigError, GitError, SessionError, TrackerError};
pub use git::{CommitRequest, Git, Vcs};
pub use suggest::{ScopeOrder, SuggestionSet};
pub use tracker::{RuntimeTracker, Stats};
pub use tui::update::Composed;
