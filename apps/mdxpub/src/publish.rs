//! Publish pipeline: detect changes, gate on build and validation, then
//! commit (and optionally push) with a synthesized semantic message.
//!
//! A failed push does not undo the commit that preceded it.

use crate::build_check::{BuildCheck, BuildOutcome};
use crate::classify::classify;
use crate::commit::synthesize;
use crate::error::PublishError;
use crate::git::Vcs;
use crate::models::change::{ChangeSet, CommitType};
use crate::models::ValidationReport;
use crate::validate::{discover_documents, is_document, run_validation};
use crate::{output, utils};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
/// Flags and settings for one publish run.
pub struct PublishOptions {
    pub push: bool,
    pub commit_type: CommitType,
    pub skip_build: bool,
    pub skip_validation: bool,
    pub remote: String,
    pub output: String,
    pub warning_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// How a successful publish run ended.
pub enum PublishOutcome {
    NoChanges,
    Aborted,
    Committed { message: String },
    Pushed { message: String, branch: String },
}

/// Changed documents for `target`.
///
/// A single file is taken as-is (relative to `project_root`); a directory
/// asks version control for added, modified, or renamed files.
pub fn detect_changes(target: &Path, project_root: &Path, vcs: &dyn Vcs) -> ChangeSet {
    if target.is_file() {
        if !is_document(target) {
            return ChangeSet::default();
        }
        let abs = std::fs::canonicalize(target).unwrap_or_else(|_| target.to_path_buf());
        let rel = pathdiff::diff_paths(&abs, project_root).unwrap_or(abs);
        return std::iter::once(classify(&rel.to_string_lossy())).collect();
    }
    let files = match vcs.changed_files() {
        Ok(files) => files,
        Err(err) => {
            tracing::warn!(%err, "could not query changed files");
            Vec::new()
        }
    };
    files
        .iter()
        .filter(|f| is_document(Path::new(f)))
        .map(|f| classify(f))
        .collect()
}

/// `y` or `yes`, case-insensitive, after trimming.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Drives one publish run against a version-control collaborator.
pub struct Publisher<'a> {
    vcs: &'a dyn Vcs,
    build: &'a BuildCheck,
    project_root: PathBuf,
    opts: PublishOptions,
}

impl<'a> Publisher<'a> {
    pub fn new(
        vcs: &'a dyn Vcs,
        build: &'a BuildCheck,
        project_root: PathBuf,
        opts: PublishOptions,
    ) -> Self {
        Publisher {
            vcs,
            build,
            project_root,
            opts,
        }
    }

    /// Run the pipeline for `target`, reading push confirmation from `input`.
    pub fn run(
        &self,
        target: &Path,
        input: &mut dyn BufRead,
    ) -> Result<PublishOutcome, PublishError> {
        eprintln!(
            "{} Project root: {}",
            utils::info_prefix(),
            self.project_root.display()
        );
        let changes = detect_changes(target, &self.project_root, self.vcs);
        tracing::info!(count = changes.len(), "detected changes");
        if changes.is_empty() {
            eprintln!("{} No MDX changes detected", utils::note_prefix());
            let plan = synthesize(&changes, self.opts.commit_type);
            output::print_publish_summary(&changes, &plan, self.opts.push, None, &self.opts.output);
            return Ok(PublishOutcome::NoChanges);
        }

        if self.opts.skip_build {
            eprintln!("{} Skipping build validation", utils::note_prefix());
        } else {
            self.check_build()?;
        }

        let validation = if self.opts.skip_validation {
            eprintln!("{} Skipping MDX validation", utils::note_prefix());
            None
        } else {
            Some(self.check_documents(target)?)
        };

        let plan = synthesize(&changes, self.opts.commit_type);
        output::print_publish_summary(
            &changes,
            &plan,
            self.opts.push,
            validation.as_ref(),
            &self.opts.output,
        );
        let message = plan.message();

        if self.opts.push && !self.confirm(input)? {
            eprintln!("{} Aborted", utils::note_prefix());
            return Ok(PublishOutcome::Aborted);
        }

        self.commit(&message)?;
        if !self.opts.push {
            eprintln!(
                "{} Commit created (dry run - use --push to actually push)",
                utils::ok_prefix()
            );
            return Ok(PublishOutcome::Committed { message });
        }

        let branch = self.vcs.current_branch().map_err(PublishError::Push)?;
        self.vcs
            .push(&self.opts.remote, &branch)
            .map_err(PublishError::Push)?;
        eprintln!(
            "{} Changes pushed to {}/{}",
            utils::ok_prefix(),
            self.opts.remote,
            branch
        );
        Ok(PublishOutcome::Pushed { message, branch })
    }

    fn check_build(&self) -> Result<(), PublishError> {
        eprintln!("{} Validating build...", utils::info_prefix());
        match self.build.run(&self.project_root) {
            Ok(BuildOutcome::Passed) => {
                eprintln!("{} Build validation passed", utils::ok_prefix());
                Ok(())
            }
            Ok(BuildOutcome::Failed { stderr }) => {
                eprintln!("{} Build validation failed:", utils::error_prefix());
                eprintln!("{}", stderr);
                Err(PublishError::BuildFailed)
            }
            Ok(BuildOutcome::TimedOut(limit)) => {
                eprintln!(
                    "{} Build timeout ({} seconds)",
                    utils::warn_prefix(),
                    limit.as_secs()
                );
                Err(PublishError::BuildFailed)
            }
            Err(err) => {
                tracing::warn!(%err, "build tool unavailable; continuing");
                eprintln!("{} Could not run build: {}", utils::warn_prefix(), err);
                Ok(())
            }
        }
    }

    /// Validate `target` in-process. In JSON mode a passing report is handed
    /// back for the publish summary so stdout carries a single document.
    fn check_documents(&self, target: &Path) -> Result<ValidationReport, PublishError> {
        eprintln!("{} Running MDX validation...", utils::info_prefix());
        let docs = discover_documents(target);
        let report = run_validation(&docs);
        let json = self.opts.output == "json";
        if !json || report.has_errors() {
            output::print_validation(&report, &self.opts.output, self.opts.warning_limit);
        }
        if report.has_errors() {
            return Err(PublishError::ValidationFailed {
                errors: report.error_count(),
            });
        }
        Ok(report)
    }

    fn confirm(&self, input: &mut dyn BufRead) -> Result<bool, PublishError> {
        eprint!("Proceed with commit and push? [y/N]: ");
        std::io::stderr().flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }

    fn commit(&self, message: &str) -> Result<(), PublishError> {
        eprintln!("{} Preparing commit...", utils::info_prefix());
        self.vcs.stage_all().map_err(PublishError::Commit)?;
        if !self.vcs.has_staged_changes().map_err(PublishError::Commit)? {
            return Err(PublishError::NothingToCommit);
        }
        self.vcs.commit(message).map_err(PublishError::Commit)?;
        eprintln!("{} Commit created successfully", utils::ok_prefix());
        Ok(())
    }
}
