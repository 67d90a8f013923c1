//! TEA Update Function
//!
//! The wizard is a linear state machine:
//!
//! ```text
//! ChoosingPrefix -> EnteringScope -> EnteringSubject -> ConfirmingBody -> Done
//!        \________________\_________________\_________________\______-> Cancelled
//! ```
//!
//! ```text
//! update : Msg -> Model -> (Model, Cmd)
//! ```
//!
//! Each stage transition finalizes exactly one field of the [`Draft`].
//! Cancellation is one rule applied before any stage-specific handling.

use super::msg::{is_cancel, KeyContext, Msg};
use super::state::{self, TextInput};
use crate::budget::{self, Allowance, CharBudget, Counter, Field, InsertCheck};
use crate::config::Prefix;
use crate::suggest::SuggestionSet;

pub const PREFIX_QUESTION: &str = "What are you committing?";
pub const SCOPE_QUESTION: &str = "What is the scope?";
pub const SUBJECT_QUESTION: &str = "What is the commit message?";
pub const BODY_QUESTION: &str = "Do you need to specify a body/footer?";

/// Rows the prefix screen spends on anything other than list items
const LIST_CHROME_ROWS: u16 = 6;
const DEFAULT_VISIBLE_ITEMS: usize = 15;

/// Commands that need to be executed by the runtime (imperative shell)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// No command
    None,
    /// Leave the event loop
    Quit,
}

impl Cmd {
    /// Check if this is a quit command
    pub fn is_quit(&self) -> bool {
        matches!(self, Cmd::Quit)
    }
}

/// Wizard stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ChoosingPrefix,
    EnteringScope,
    EnteringSubject,
    ConfirmingBody,
    Done,
    Cancelled,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Cancelled)
    }

    /// Budgeted field edited in this stage
    pub fn field(self) -> Option<Field> {
        match self {
            Stage::EnteringScope => Some(Field::Scope),
            Stage::EnteringSubject => Some(Field::Subject),
            _ => None,
        }
    }
}

/// Prefix filter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Off,
    /// Typing into the filter
    Editing,
    /// Filter kept, navigating the reduced list
    Applied,
}

/// The commit message under construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub prefix: String,
    pub scope: String,
    pub subject: String,
    pub wants_body: bool,
}

impl Draft {
    /// `prefix(scope): subject`, or `prefix: subject` without a scope
    pub fn message(&self) -> String {
        if self.scope.is_empty() {
            format!("{}: {}", self.prefix, self.subject)
        } else {
            format!("{}({}): {}", self.prefix, self.scope, self.subject)
        }
    }
}

/// Final result of a completed wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
    pub message: String,
    pub wants_body: bool,
}

/// Wizard model
#[derive(Debug, Clone)]
pub struct Model {
    pub stage: Stage,
    pub draft: Draft,
    pub prefix_description: String,
    /// Answered questions, for the summary above the active prompt
    pub transcript: Vec<(&'static str, String)>,

    // Prefix list
    pub prefixes: Vec<Prefix>,
    /// Indices into `prefixes` that pass the filter
    pub visible: Vec<usize>,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub visible_items: usize,
    pub filter: TextInput,
    pub filter_mode: FilterMode,

    // Free-text stages
    pub input: TextInput,
    pub budget: CharBudget,
    /// Characters already spent against a shared budget
    pub committed: usize,
    /// Shared budget ran out: field is locked and will be left blank
    pub limit_reached: bool,

    // Suggestions arrive asynchronously; `None` until then
    pub scope_suggestions: Option<SuggestionSet>,
    pub message_suggestions: Option<SuggestionSet>,
}

impl Model {
    pub fn new(prefixes: Vec<Prefix>, budget: CharBudget) -> Self {
        let visible = (0..prefixes.len()).collect();
        Self {
            stage: Stage::ChoosingPrefix,
            draft: Draft::default(),
            prefix_description: String::new(),
            transcript: Vec::new(),
            prefixes,
            visible,
            selected_index: 0,
            scroll_offset: 0,
            visible_items: DEFAULT_VISIBLE_ITEMS,
            filter: TextInput::default(),
            filter_mode: FilterMode::Off,
            input: TextInput::default(),
            budget,
            committed: 0,
            limit_reached: false,
            scope_suggestions: None,
            message_suggestions: None,
        }
    }

    /// Key map for the current stage
    pub fn key_context(&self) -> KeyContext {
        match self.stage {
            Stage::ChoosingPrefix => match self.filter_mode {
                FilterMode::Off => KeyContext::PrefixList,
                FilterMode::Editing => KeyContext::PrefixFilter,
                FilterMode::Applied => KeyContext::FilteredPrefixList,
            },
            Stage::EnteringScope | Stage::EnteringSubject => KeyContext::SuggestedField,
            Stage::ConfirmingBody => KeyContext::PlainField,
            Stage::Done | Stage::Cancelled => KeyContext::Finished,
        }
    }

    pub fn selected_prefix(&self) -> Option<&Prefix> {
        self.visible
            .get(self.selected_index)
            .and_then(|&i| self.prefixes.get(i))
    }

    /// Live allowance of the field being edited
    pub fn allowance(&self) -> Option<Allowance> {
        self.stage
            .field()
            .map(|field| self.budget.allowance(field, self.committed))
    }

    /// Live `[used/limit]` counter of the field being edited
    pub fn counter(&self) -> Option<Counter> {
        self.stage
            .field()
            .map(|field| self.budget.counter(field, self.committed, self.input.len()))
    }

    /// Composed message; only available once the wizard is done
    pub fn composed(&self) -> Option<Composed> {
        (self.stage == Stage::Done).then(|| Composed {
            message: self.draft.message(),
            wants_body: self.draft.wants_body,
        })
    }

    fn suggestions_for_stage(&mut self) -> Option<&mut SuggestionSet> {
        match self.stage {
            Stage::EnteringScope => self.scope_suggestions.as_mut(),
            Stage::EnteringSubject => self.message_suggestions.as_mut(),
            _ => None,
        }
    }

    fn refilter(&mut self) {
        self.visible = state::filter_prefixes(&self.prefixes, self.filter.value());
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    fn select(&mut self, index: usize) {
        self.selected_index = state::clamp_selection(index, self.visible.len());
        self.scroll_offset = state::calculate_scroll_offset(
            self.selected_index,
            self.scroll_offset,
            self.visible_items,
        );
    }

    /// Reset the input for the stage just entered
    fn enter_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.input.clear();
        self.limit_reached = matches!(self.allowance(), Some(Allowance::Exhausted));
    }
}

/// The core update function - processes a message and returns new state + commands
pub fn update(msg: Msg, mut model: Model) -> (Model, Cmd) {
    // Background results and resizes are accepted in every stage
    let msg = match msg {
        Msg::ScopeSuggestionsReady(items) => {
            model.scope_suggestions = Some(SuggestionSet::new(items));
            return (model, Cmd::None);
        }
        Msg::MessageSuggestionsReady(items) => {
            model.message_suggestions = Some(SuggestionSet::new(items));
            return (model, Cmd::None);
        }
        Msg::Resize(_, height) => {
            model.visible_items = usize::from(height.saturating_sub(LIST_CHROME_ROWS).max(1));
            let selected = model.selected_index;
            model.select(selected);
            return (model, Cmd::None);
        }
        other => other,
    };

    if model.stage.is_terminal() {
        return (model, Cmd::None);
    }

    if is_cancel(&msg) {
        model.stage = Stage::Cancelled;
        return (model, Cmd::Quit);
    }

    match model.stage {
        Stage::ChoosingPrefix => update_prefix(msg, model),
        Stage::EnteringScope | Stage::EnteringSubject => update_field(msg, model),
        Stage::ConfirmingBody => update_body(msg, model),
        Stage::Done | Stage::Cancelled => (model, Cmd::None),
    }
}

fn update_prefix(msg: Msg, mut model: Model) -> (Model, Cmd) {
    match msg {
        Msg::MoveUp => {
            let index = state::move_selection_up(model.selected_index);
            model.select(index);
        }
        Msg::MoveDown => {
            let index = state::move_selection_down(model.selected_index, model.visible.len());
            model.select(index);
        }
        Msg::JumpToTop => model.select(0),
        Msg::JumpToBottom => model.select(model.visible.len().saturating_sub(1)),

        Msg::SelectDigit(digit) => {
            if let Some(index) = state::digit_to_index(digit, model.visible.len()) {
                model.select(index);
                return confirm_prefix(model);
            }
        }

        Msg::StartFilter => model.filter_mode = FilterMode::Editing,
        Msg::FilterInput(c) => {
            model.filter.insert(c);
            model.refilter();
        }
        Msg::FilterBackspace => {
            model.filter.backspace();
            model.refilter();
        }
        Msg::ApplyFilter => {
            model.filter_mode = if model.filter.is_empty() {
                FilterMode::Off
            } else {
                FilterMode::Applied
            };
        }
        Msg::ClearFilter => {
            model.filter.clear();
            model.filter_mode = FilterMode::Off;
            model.refilter();
        }

        Msg::Confirm => return confirm_prefix(model),
        _ => {}
    }
    (model, Cmd::None)
}

fn confirm_prefix(mut model: Model) -> (Model, Cmd) {
    let Some(prefix) = model.selected_prefix().cloned() else {
        // Empty filter result: nothing to confirm
        return (model, Cmd::None);
    };

    model.committed = budget::decoration_len(&prefix.title);
    model.transcript.push((
        PREFIX_QUESTION,
        format!("{}: {}", prefix.title, prefix.description),
    ));
    model.draft.prefix = prefix.title;
    model.prefix_description = prefix.description;
    model.enter_stage(Stage::EnteringScope);
    (model, Cmd::None)
}

fn update_field(msg: Msg, mut model: Model) -> (Model, Cmd) {
    let Some(allowance) = model.allowance() else {
        return (model, Cmd::None);
    };

    match msg {
        Msg::Confirm => return finalize_field(model),

        // Exhausted shared budget: nothing but confirm/cancel
        _ if model.limit_reached => {}

        Msg::Input(c) => match allowance.check_insert(model.input.len()) {
            InsertCheck::Accept => model.input.insert(c),
            InsertCheck::Refuse => {}
            InsertCheck::Exhaust => {
                model.input.clear();
                model.limit_reached = true;
            }
        },
        Msg::Cycle => {
            let candidate = model
                .suggestions_for_stage()
                .and_then(|set| set.cycle())
                .map(|c| budget::truncate_chars(c, allowance.max_len()).to_string());
            if let Some(candidate) = candidate {
                model.input.set_value(&candidate);
            }
        }
        Msg::Backspace => model.input.backspace(),
        Msg::Delete => model.input.delete(),
        Msg::CursorLeft => model.input.move_left(),
        Msg::CursorRight => model.input.move_right(),
        Msg::CursorHome => model.input.move_home(),
        Msg::CursorEnd => model.input.move_end(),
        _ => {}
    }
    (model, Cmd::None)
}

fn finalize_field(mut model: Model) -> (Model, Cmd) {
    let value = if model.limit_reached {
        String::new()
    } else {
        model.input.value().to_string()
    };

    match model.stage {
        Stage::EnteringScope => {
            model.committed += budget::char_len(&value);
            model.transcript.push((SCOPE_QUESTION, value.clone()));
            model.draft.scope = value;
            model.enter_stage(Stage::EnteringSubject);
        }
        Stage::EnteringSubject => {
            model.transcript.push((SUBJECT_QUESTION, value.clone()));
            model.draft.subject = value;
            model.enter_stage(Stage::ConfirmingBody);
        }
        _ => {}
    }
    (model, Cmd::None)
}

fn update_body(msg: Msg, mut model: Model) -> (Model, Cmd) {
    match msg {
        Msg::Input(c) if model.input.is_empty() => model.input.insert(c),
        Msg::Backspace => model.input.backspace(),
        Msg::Delete => model.input.delete(),
        Msg::CursorLeft => model.input.move_left(),
        Msg::CursorRight => model.input.move_right(),
        Msg::Confirm => {
            model.draft.wants_body = model.input.value().to_lowercase().starts_with('y');
            model
                .transcript
                .push((BODY_QUESTION, model.draft.wants_body.to_string()));
            model.stage = Stage::Done;
            return (model, Cmd::Quit);
        }
        _ => {}
    }
    (model, Cmd::None)
}
