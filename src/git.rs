//! The `git` collaborator
//!
//! Everything comet needs from version control goes through [`Vcs`], so the
//! wizard and commit dispatch can be exercised without a repository.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::GitError;

/// A finished commit, ready to hand to `git commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub message: String,
    /// Open the editor so the user can add a body/footer (`-e`)
    pub open_editor: bool,
    /// Add a Signed-off-by trailer (`-s`)
    pub sign_off: bool,
    /// Extra arguments forwarded untouched
    pub passthrough: Vec<String>,
}

impl CommitRequest {
    /// Arguments for `git`, in the order git receives them
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["commit".to_string(), "-m".to_string(), self.message.clone()];
        args.extend(self.passthrough.iter().cloned());
        if self.open_editor {
            args.push("-e".to_string());
        }
        if self.sign_off {
            args.push("-s".to_string());
        }
        args
    }
}

/// Version-control operations the wizard depends on
pub trait Vcs: Send + Sync {
    /// Paths currently staged for commit
    fn staged_files(&self) -> Result<Vec<String>, GitError>;

    /// Top-level directory of the current repository
    fn repository_root(&self) -> Result<PathBuf, GitError>;

    /// Subject lines of commits whose message contains `term`
    fn search_commit_subjects(&self, term: &str) -> Result<Vec<String>, GitError>;

    /// Create the commit
    fn commit(&self, request: &CommitRequest) -> Result<(), GitError>;
}

/// [`Vcs`] backed by the `git` executable
#[derive(Debug, Clone, Copy, Default)]
pub struct Git;

/// Fail early when git is not on `PATH`
pub fn ensure_installed() -> Result<PathBuf, GitError> {
    which::which("git").map_err(|_| GitError::NotInstalled)
}

impl Git {
    /// Run git and return trimmed stdout; on failure the combined output is
    /// the error message, verbatim.
    fn capture(&self, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!(?args, "running git");
        let output = Command::new("git")
            .args(args)
            .output()
            .map_err(GitError::Spawn)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            Err(GitError::CommandFailed(combined.trim().to_string()))
        }
    }
}

impl Vcs for Git {
    fn staged_files(&self) -> Result<Vec<String>, GitError> {
        let output = self.capture(&["diff", "--no-ext-diff", "--cached", "--name-only"])?;
        let files = split_lines(&output);
        if files.is_empty() {
            return Err(GitError::NothingStaged);
        }
        Ok(files)
    }

    fn repository_root(&self) -> Result<PathBuf, GitError> {
        self.capture(&["rev-parse", "--show-toplevel"])
            .map(PathBuf::from)
    }

    fn search_commit_subjects(&self, term: &str) -> Result<Vec<String>, GitError> {
        let grep = format!("--grep={term}");
        let output = self.capture(&["log", "--pretty=format:%s", &grep])?;
        Ok(split_lines(&output))
    }

    fn commit(&self, request: &CommitRequest) -> Result<(), GitError> {
        let args = request.args();
        tracing::debug!(?args, "running git commit");
        let status = Command::new("git")
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(GitError::Spawn)?;

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(GitError::CommitFailed(code)),
            None => Err(GitError::CommitInterrupted),
        }
    }
}

fn split_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(open_editor: bool, sign_off: bool, passthrough: &[&str]) -> CommitRequest {
        CommitRequest {
            message: "feat(api): add health check".to_string(),
            open_editor,
            sign_off,
            passthrough: passthrough.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_commit_args_plain() {
        assert_eq!(
            request(false, false, &[]).args(),
            vec!["commit", "-m", "feat(api): add health check"]
        );
    }

    #[test]
    fn test_commit_args_with_flags() {
        assert_eq!(
            request(true, true, &["--no-verify"]).args(),
            vec![
                "commit",
                "-m",
                "feat(api): add health check",
                "--no-verify",
                "-e",
                "-s"
            ]
        );
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(
            split_lines("src/a.rs\nsrc/b.rs\n\n"),
            vec!["src/a.rs".to_string(), "src/b.rs".to_string()]
        );
        assert!(split_lines("").is_empty());
    }
}
