//! Version-control collaborator: status query plus stage/commit/push.
//!
//! `Vcs` is the seam the publish pipeline talks to; `GitCli` shells out to
//! the `git` binary in the project root.

use crate::error::GitError;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Operations the publisher needs from version control. Each is independently
/// failable.
pub trait Vcs {
    /// Paths of added, modified, or renamed files, relative to the root.
    fn changed_files(&self) -> Result<Vec<String>, GitError>;
    fn stage_all(&self) -> Result<(), GitError>;
    fn has_staged_changes(&self) -> Result<bool, GitError>;
    fn commit(&self, message: &str) -> Result<(), GitError>;
    fn current_branch(&self) -> Result<String, GitError>;
    fn push(&self, remote: &str, branch: &str) -> Result<(), GitError>;
}

/// `git` invoked as a subprocess.
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    pub fn new(root: &Path) -> Self {
        GitCli {
            root: root.to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output, GitError> {
        let command = args.join(" ");
        tracing::debug!(%command, root = %self.root.display(), "git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(GitError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl Vcs for GitCli {
    fn changed_files(&self) -> Result<Vec<String>, GitError> {
        let out = self.run(&["status", "--porcelain"])?;
        Ok(parse_porcelain(&String::from_utf8_lossy(&out.stdout)))
    }

    fn stage_all(&self) -> Result<(), GitError> {
        self.run(&["add", "-A"]).map(|_| ())
    }

    fn has_staged_changes(&self) -> Result<bool, GitError> {
        let out = self.run(&["diff", "--staged", "--name-only"])?;
        Ok(!String::from_utf8_lossy(&out.stdout).trim().is_empty())
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.run(&["commit", "-m", message]).map(|_| ())
    }

    fn current_branch(&self) -> Result<String, GitError> {
        let out = self.run(&["branch", "--show-current"])?;
        Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run(&["push", remote, branch]).map(|_| ())
    }
}

/// Whether a two-letter porcelain status marks the file as changed.
///
/// Index status A/M/R or worktree status A/M qualify.
pub fn is_changed_status(index: char, worktree: char) -> bool {
    matches!(index, 'A' | 'M' | 'R') || matches!(worktree, 'A' | 'M')
}

/// Extract changed paths from `git status --porcelain` output. Renames
/// (`old -> new`) yield the new path.
pub fn parse_porcelain(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut status = line.chars();
            let index = status.next()?;
            let worktree = status.next()?;
            if !is_changed_status(index, worktree) {
                return None;
            }
            let path = line.get(3..)?.trim();
            let path = path.rsplit_once(" -> ").map_or(path, |(_, new)| new);
            Some(path.trim_matches('"').to_string())
        })
        .collect()
}
