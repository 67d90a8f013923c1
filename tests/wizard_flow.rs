//! End-to-end wizard sessions
//!
//! Drive the state machine with the messages a user would produce, feed it
//! suggestions built from a fake repository, and commit through a recording
//! `Vcs`. No terminal and no real git involved.

use std::path::PathBuf;
use std::sync::Mutex;

use comet::suggest::{self, ScopeOrder};
use comet::tui::msg::Msg;
use comet::tui::update::{update, Model, Stage};
use comet::{config::default_prefixes, session, CharBudget, CommitRequest, GitError, SessionError, Vcs};

/// Fake repository that records commits instead of running git
struct FakeRepo {
    staged: Vec<String>,
    history: Vec<String>,
    commits: Mutex<Vec<CommitRequest>>,
}

impl FakeRepo {
    fn new(staged: &[&str], history: &[&str]) -> Self {
        Self {
            staged: staged.iter().map(|s| s.to_string()).collect(),
            history: history.iter().map(|s| s.to_string()).collect(),
            commits: Mutex::new(Vec::new()),
        }
    }

    fn commits(&self) -> Vec<CommitRequest> {
        self.commits.lock().unwrap().clone()
    }
}

impl Vcs for FakeRepo {
    fn staged_files(&self) -> Result<Vec<String>, GitError> {
        if self.staged.is_empty() {
            return Err(GitError::NothingStaged);
        }
        Ok(self.staged.clone())
    }

    fn repository_root(&self) -> Result<PathBuf, GitError> {
        Ok(PathBuf::from("/repo"))
    }

    fn search_commit_subjects(&self, term: &str) -> Result<Vec<String>, GitError> {
        Ok(self
            .history
            .iter()
            .filter(|line| line.contains(term))
            .cloned()
            .collect())
    }

    fn commit(&self, request: &CommitRequest) -> Result<(), GitError> {
        self.commits.lock().unwrap().push(request.clone());
        Ok(())
    }
}

/// Start a session the way the binary does: suggestions first, then keys
fn start(repo: &FakeRepo, term: &str, budget: CharBudget) -> Model {
    let files = repo.staged_files().unwrap();
    let scopes = suggest::path_segments(&files, ScopeOrder::Descending);
    let lines = repo.search_commit_subjects(term).unwrap();
    let messages = suggest::historical_messages(&lines, false);

    let model = Model::new(default_prefixes(), budget);
    drive(
        model,
        [
            Msg::ScopeSuggestionsReady(scopes),
            Msg::MessageSuggestionsReady(messages),
        ],
    )
}

fn drive(model: Model, msgs: impl IntoIterator<Item = Msg>) -> Model {
    msgs.into_iter().fold(model, |m, msg| update(msg, m).0)
}

fn typed(text: &str) -> impl Iterator<Item = Msg> + '_ {
    text.chars().map(Msg::Input)
}

#[test]
fn test_commit_with_typed_scope() {
    let repo = FakeRepo::new(&["src/api/health.rs"], &[]);
    let model = start(&repo, "", CharBudget::default());

    let model = drive(model, [Msg::SelectDigit(1)]);
    let model = drive(model, typed("api"));
    let model = drive(model, [Msg::Confirm]);
    let model = drive(model, typed("add health check"));
    let model = drive(model, [Msg::Confirm, Msg::Confirm]);

    let request = session::dispatch(model.composed(), &repo, false, &[]).unwrap();
    assert_eq!(request.message, "feat(api): add health check");
    assert_eq!(
        request.args(),
        vec!["commit", "-m", "feat(api): add health check"]
    );
    assert_eq!(repo.commits(), vec![request]);
}

#[test]
fn test_commit_without_scope() {
    let repo = FakeRepo::new(&["README.md"], &[]);
    let model = start(&repo, "", CharBudget::default());

    let model = drive(model, [Msg::SelectDigit(1), Msg::Confirm]);
    let model = drive(model, typed("add health check"));
    let model = drive(model, [Msg::Confirm, Msg::Confirm]);

    let request = session::dispatch(model.composed(), &repo, false, &[]).unwrap();
    assert_eq!(request.message, "feat: add health check");
}

#[test]
fn test_suggestions_fill_both_fields() {
    let repo = FakeRepo::new(
        &["src/tui/app.rs", "src/tui/ui.rs"],
        &["fix(ui): handle resize", "docs: explain resize"],
    );
    let model = start(&repo, "resize", CharBudget::default());

    // Longest segment first
    let model = drive(model, [Msg::SelectDigit(2), Msg::Cycle]);
    assert_eq!(model.input.value(), "src/tui/app.rs");
    let model = drive(model, [Msg::Confirm, Msg::Cycle, Msg::Cycle, Msg::Confirm]);
    assert_eq!(model.draft.subject, "explain resize");

    let model = drive(model, [Msg::Input('y'), Msg::Confirm]);
    let request = session::dispatch(model.composed(), &repo, true, &["--no-verify".into()]).unwrap();
    assert_eq!(request.message, "fix(src/tui/app.rs): explain resize");
    assert_eq!(
        request.args(),
        vec![
            "commit",
            "-m",
            "fix(src/tui/app.rs): explain resize",
            "--no-verify",
            "-e",
            "-s"
        ]
    );
}

#[test]
fn test_cancel_never_commits() {
    let repo = FakeRepo::new(&["README.md"], &[]);
    let model = start(&repo, "", CharBudget::default());

    let model = drive(model, [Msg::SelectDigit(1), Msg::Confirm]);
    let model = drive(model, typed("half a thou"));
    let model = drive(model, [Msg::Cancel]);
    assert_eq!(model.stage, Stage::Cancelled);

    let err = session::dispatch(model.composed(), &repo, false, &[]).unwrap_err();
    assert!(matches!(err, SessionError::Aborted));
    assert_eq!(err.to_string(), "Aborted.");
    assert!(repo.commits().is_empty());
}

#[test]
fn test_shared_budget_session() {
    let repo = FakeRepo::new(&["README.md"], &[]);
    let model = start(&repo, "", CharBudget::Shared { total: 10 });

    let model = drive(model, [Msg::SelectDigit(1), Msg::Confirm]);
    let model = drive(model, typed("abc"));
    assert!(model.limit_reached);

    let model = drive(model, [Msg::Confirm, Msg::Confirm]);
    let request = session::dispatch(model.composed(), &repo, false, &[]).unwrap();
    assert_eq!(request.message, "feat: ");
}

#[test]
fn test_nothing_staged_is_reported() {
    let repo = FakeRepo::new(&[], &[]);
    let err = repo.staged_files().unwrap_err();
    assert_eq!(err.to_string(), "no files added to staging area");
}
