//! Error types for comet modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from invoking the `git` binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    NotInstalled,

    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{0}")]
    CommandFailed(String),

    #[error("no files added to staging area")]
    NothingStaged,

    #[error("git commit exited with status {0}")]
    CommitFailed(i32),

    #[error("git commit was terminated by a signal")]
    CommitInterrupted,
}

/// Errors while locating or parsing the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in config file '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid toml in config file '{}': {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from the runtime tracker.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("tracking was not started")]
    NotStarted,

    #[error("could not determine the user's home directory")]
    NoHomeDir,

    #[error("failed to access stats file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed stats file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize stats: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors from turning a finished wizard into a commit.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Aborted.")]
    Aborted,

    #[error("error committing: {0}")]
    Commit(#[source] GitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_file() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::Json {
            path: PathBuf::from("/home/me/.comet.json"),
            source,
        };
        assert!(err.to_string().contains("/home/me/.comet.json"));
    }

    #[test]
    fn test_command_failed_is_verbatim() {
        let err = GitError::CommandFailed("fatal: not a git repository".to_string());
        assert_eq!(err.to_string(), "fatal: not a git repository");
    }
}
