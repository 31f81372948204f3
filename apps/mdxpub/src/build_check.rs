//! External build check (e.g. `npm run build`) bounded by a hard timeout.
//!
//! A build that does not finish within the timeout is killed and treated as
//! failed; it is never retried.

use crate::config::find_package_root;
use crate::error::BuildError;
use crate::models::{Issue, Rule, BUILD_PSEUDO_FILE};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of a build invocation that ran to completion or timed out.
pub enum BuildOutcome {
    Passed,
    Failed { stderr: String },
    TimedOut(Duration),
}

impl BuildOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, BuildOutcome::Passed)
    }
}

#[derive(Debug, Clone)]
/// Build tool invocation: argv plus timeout.
pub struct BuildCheck {
    command: Vec<String>,
    timeout: Duration,
}

impl BuildCheck {
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        BuildCheck { command, timeout }
    }

    /// Run the build in `root`, capturing output.
    pub fn run(&self, root: &Path) -> Result<BuildOutcome, BuildError> {
        let (program, args) = self.command.split_first().ok_or(BuildError::EmptyCommand)?;
        tracing::info!(program = %program, root = %root.display(), "running build check");
        let mut child = Command::new(program)
            .args(args)
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BuildError::Spawn {
                program: program.clone(),
                source,
            })?;

        // Drain both pipes so a chatty build cannot block on a full buffer.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match wait_with_deadline(&mut child, self.timeout)? {
            Some(status) => status,
            None => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "build timed out");
                let _ = child.kill();
                let _ = child.wait();
                return Ok(BuildOutcome::TimedOut(self.timeout));
            }
        };
        let _ = stdout.join();
        let stderr = stderr.join().unwrap_or_default();
        if status.success() {
            tracing::info!("build check passed");
            Ok(BuildOutcome::Passed)
        } else {
            tracing::warn!(%status, "build check failed");
            Ok(BuildOutcome::Failed { stderr })
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut p) = pipe {
            let mut bytes = Vec::new();
            if p.read_to_end(&mut bytes).is_ok() {
                buf = String::from_utf8_lossy(&bytes).into_owned();
            }
        }
        buf
    })
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
) -> Result<Option<std::process::ExitStatus>, BuildError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().map_err(BuildError::Wait)? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Stderr lines that look like diagnostics worth surfacing.
pub fn diagnostic_lines(stderr: &str) -> Vec<&str> {
    stderr
        .lines()
        .filter(|l| l.contains("Error") || l.contains("error") || l.to_lowercase().contains("mdx"))
        .map(str::trim)
        .collect()
}

/// Run the build for the project containing `start` and convert the outcome
/// into issues attached to the `build` pseudo-file.
pub fn build_issues(check: &BuildCheck, start: &Path) -> Vec<Issue> {
    let Some(root) = find_package_root(start) else {
        return vec![Issue::warning(
            BUILD_PSEUDO_FILE,
            0,
            Rule::Build,
            "Could not find package.json in project. Skipping build validation.",
        )];
    };
    match check.run(&root) {
        Ok(BuildOutcome::Passed) => Vec::new(),
        Ok(BuildOutcome::Failed { stderr }) => {
            let mut issues = vec![Issue::error(
                BUILD_PSEUDO_FILE,
                0,
                Rule::Build,
                "Build failed. Check MDX syntax errors below:",
            )];
            issues.extend(
                diagnostic_lines(&stderr)
                    .into_iter()
                    .map(|line| Issue::error(BUILD_PSEUDO_FILE, 0, Rule::Build, line)),
            );
            issues
        }
        Ok(BuildOutcome::TimedOut(limit)) => vec![Issue::error(
            BUILD_PSEUDO_FILE,
            0,
            Rule::Build,
            format!(
                "Build timeout after {} seconds. This may indicate a problem or just a large project.",
                limit.as_secs()
            ),
        )],
        Err(err) => vec![Issue::error(
            BUILD_PSEUDO_FILE,
            0,
            Rule::Build,
            format!("Error running build: {}", err),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use std::fs;
    use tempfile::tempdir;

    fn sh(script: &str, timeout: Duration) -> BuildCheck {
        BuildCheck::new(
            vec!["sh".into(), "-c".into(), script.into()],
            timeout,
        )
    }

    #[test]
    fn diagnostics_filter() {
        let stderr = "compiling\n  Error: bad token  \nwarning: x\nfailed in page.MDX\n";
        assert_eq!(
            diagnostic_lines(stderr),
            vec!["Error: bad token", "failed in page.MDX"]
        );
    }

    #[test]
    fn passing_build() {
        let dir = tempdir().unwrap();
        let out = sh("exit 0", Duration::from_secs(10)).run(dir.path()).unwrap();
        assert!(out.passed());
    }

    #[test]
    fn failing_build_captures_stderr() {
        let dir = tempdir().unwrap();
        let out = sh("echo 'Error: boom' >&2; exit 3", Duration::from_secs(10))
            .run(dir.path())
            .unwrap();
        match out {
            BuildOutcome::Failed { stderr } => assert!(stderr.contains("Error: boom")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn slow_build_times_out() {
        let dir = tempdir().unwrap();
        let out = sh("sleep 5", Duration::from_millis(200)).run(dir.path()).unwrap();
        assert_eq!(out, BuildOutcome::TimedOut(Duration::from_millis(200)));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = tempdir().unwrap();
        let check = BuildCheck::new(
            vec!["mdxpub-no-such-program".into()],
            Duration::from_secs(1),
        );
        assert!(matches!(check.run(dir.path()), Err(BuildError::Spawn { .. })));
        assert!(matches!(
            BuildCheck::new(Vec::new(), Duration::from_secs(1)).run(dir.path()),
            Err(BuildError::EmptyCommand)
        ));
    }

    #[test]
    fn build_issues_from_failed_build() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let issues = build_issues(
            &sh("echo 'error in a.mdx' >&2; echo noise >&2; exit 1", Duration::from_secs(10)),
            dir.path(),
        );
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Build failed. Check MDX syntax errors below:", "error in a.mdx"]
        );
        assert!(issues.iter().all(|i| i.file == "build" && i.severity == Severity::Error));
    }
}
