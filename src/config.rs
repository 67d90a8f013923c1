//! Configuration file support for comet
//!
//! Reads `.comet.toml` / `.comet.json` from the working directory or the home
//! directory, or `config.toml` / `config.json` from the comet config directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::budget::CharBudget;
use crate::error::ConfigError;
use crate::suggest::ScopeOrder;

/// Name of the per-user directory under the XDG config home
pub const APP_DIR: &str = "comet";

const LOCAL_FILE_STEM: &str = ".comet";

/// A commit category offered in the first wizard stage
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Prefix {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// The eleven built-in categories used when no prefixes are configured
pub fn default_prefixes() -> Vec<Prefix> {
    vec![
        Prefix::new("feat", "Introduces a new feature"),
        Prefix::new("fix", "Patches a bug"),
        Prefix::new("docs", "Documentation changes only"),
        Prefix::new("test", "Adding missing tests or correcting existing tests"),
        Prefix::new("build", "Changes that affect the build system"),
        Prefix::new("ci", "Changes to CI configuration files and scripts"),
        Prefix::new("perf", "A code change that improves performance"),
        Prefix::new(
            "refactor",
            "A code change that neither fixes a bug nor adds a feature",
        ),
        Prefix::new("revert", "Reverts a previous change"),
        Prefix::new(
            "style",
            "Changes that do not affect the meaning of the code (white-space, formatting, missing semi-colons, etc)",
        ),
        Prefix::new(
            "chore",
            "A minor change which does not fit into any other category",
        ),
    ]
}

/// Configuration structure
///
/// Limits of `0` mean "not configured" and fall back to the defaults.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Commit categories, in display order
    #[serde(default)]
    pub prefixes: Vec<Prefix>,

    /// Pass `-s` to git commit
    #[serde(default)]
    pub sign_off_commits: bool,

    /// Independent scope limit (default 16)
    #[serde(default)]
    pub scope_input_char_limit: usize,

    /// Independent subject limit (default 100)
    #[serde(default)]
    pub commit_input_char_limit: usize,

    /// Shared limit across prefix decoration, scope and subject
    #[serde(default)]
    pub total_input_char_limit: usize,

    /// Sort direction for path-segment scope suggestions
    #[serde(default)]
    pub scope_completion_order: ScopeOrder,

    /// Offer whole history lines instead of the text after the first colon
    #[serde(default)]
    pub find_all_commit_messages: bool,

    /// Record how long each session takes
    #[serde(default = "default_true")]
    pub track_runtime: bool,

    /// Print accumulated totals after a commit
    #[serde(default)]
    pub show_stats: bool,

    /// Drop stats buckets older than this many days after each run
    #[serde(default)]
    pub stats_retention_days: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefixes: Vec::new(),
            sign_off_commits: false,
            scope_input_char_limit: 0,
            commit_input_char_limit: 0,
            total_input_char_limit: 0,
            scope_completion_order: ScopeOrder::default(),
            find_all_commit_messages: false,
            track_runtime: true,
            show_stats: false,
            stats_retention_days: None,
        }
    }
}

impl Config {
    /// Load config from the first settings file found.
    /// Returns default config if no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().ok();
        let home = dirs::home_dir();
        let config_dir = config_dir();
        let candidates = candidate_paths(cwd.as_deref(), home.as_deref(), config_dir.as_deref());

        match candidates.into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a specific settings file; the format follows the extension
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading config");

        if path.extension().and_then(|e| e.to_str()) == Some("toml") {
            toml::from_str(&contents).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Configured prefixes, or the built-in set when none are configured
    pub fn prefixes(&self) -> Vec<Prefix> {
        if self.prefixes.is_empty() {
            default_prefixes()
        } else {
            self.prefixes.clone()
        }
    }

    /// Resolve the character budget for the scope and subject stages
    pub fn budget(&self) -> CharBudget {
        if self.total_input_char_limit > 0 {
            return CharBudget::Shared {
                total: self.total_input_char_limit,
            };
        }
        CharBudget::PerField {
            scope: non_zero_or(self.scope_input_char_limit, CharBudget::DEFAULT_SCOPE_LIMIT),
            subject: non_zero_or(
                self.commit_input_char_limit,
                CharBudget::DEFAULT_SUBJECT_LIMIT,
            ),
        }
    }
}

fn non_zero_or(value: usize, fallback: usize) -> usize {
    if value == 0 {
        fallback
    } else {
        value
    }
}

/// Per-user comet directory.
///
/// `$XDG_CONFIG_HOME/comet` when that variable holds an absolute path,
/// `~/.config/comet` otherwise.
pub fn config_dir() -> Option<PathBuf> {
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    resolve_config_dir(xdg.as_deref(), dirs::home_dir().as_deref())
}

fn resolve_config_dir(xdg: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    match xdg {
        Some(dir) if dir.is_absolute() => Some(dir.join(APP_DIR)),
        _ => home.map(|h| h.join(".config").join(APP_DIR)),
    }
}

/// Settings files in lookup order
pub fn candidate_paths(
    cwd: Option<&Path>,
    home: Option<&Path>,
    config_dir: Option<&Path>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for dir in [cwd, home].into_iter().flatten() {
        paths.push(dir.join(format!("{LOCAL_FILE_STEM}.toml")));
        paths.push(dir.join(format!("{LOCAL_FILE_STEM}.json")));
    }
    if let Some(dir) = config_dir {
        paths.push(dir.join("config.toml"));
        paths.push(dir.join("config.json"));
    }
    paths
}
