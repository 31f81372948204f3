//! Error types for external collaborators and the publish pipeline.
//!
//! Validation findings are never errors; they travel as `Issue` values in a
//! `ValidationReport`.

use std::io;
use thiserror::Error;

/// Failures from invoking `git`.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("git {command} exited with status {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Failures that prevent the build tool from producing an outcome.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("build command is empty")]
    EmptyCommand,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed while waiting for build: {0}")]
    Wait(#[source] io::Error),
}

/// Reasons a publish run stops with a non-zero exit.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Build validation failed. Fix errors before publishing.")]
    BuildFailed,
    #[error("MDX validation failed with {errors} error(s). Fix errors before publishing.")]
    ValidationFailed { errors: usize },
    #[error("No changes to commit")]
    NothingToCommit,
    #[error("Commit failed: {0}")]
    Commit(#[source] GitError),
    #[error("Commit succeeded but push failed: {0}")]
    Push(#[source] GitError),
    #[error("failed to read confirmation: {0}")]
    Prompt(#[from] io::Error),
}

impl PublishError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
