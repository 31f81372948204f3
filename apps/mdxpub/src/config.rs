//! Configuration discovery and effective settings resolution.
//!
//! mdxpub reads `mdxpub.toml|yaml|yml` from the project root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `validate.build`: unset (build check runs for directory targets only)
//! - `validate.warning_limit`: 10
//! - `build.command`: `["npm", "run", "build"]`
//! - `build.timeout_secs`: 300
//! - `publish.commit_type`: `docs`
//! - `publish.remote`: `origin`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::models::change::CommitType;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILES: [&str; 3] = ["mdxpub.toml", "mdxpub.yaml", "mdxpub.yml"];
pub const DEFAULT_BUILD_COMMAND: [&str; 3] = ["npm", "run", "build"];
pub const DEFAULT_BUILD_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_WARNING_LIMIT: usize = 10;

#[derive(Debug, Default, Deserialize, Clone)]
/// Validation section under `[validate]`.
pub struct ValidateCfg {
    pub build: Option<bool>,
    pub warning_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// External build tool section under `[build]`.
pub struct BuildCfg {
    pub command: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Publish section under `[publish]`.
pub struct PublishCfg {
    pub commit_type: Option<CommitType>,
    pub remote: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `mdxpub.toml|yaml`.
pub struct MdxpubConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub validate: Option<ValidateCfg>,
    #[serde(default)]
    pub build: Option<BuildCfg>,
    #[serde(default)]
    pub publish: Option<PublishCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub project_root: PathBuf,
    pub output: String,
    pub build: Option<bool>,
    pub warning_limit: usize,
    pub build_command: Vec<String>,
    pub build_timeout: Duration,
    pub commit_type: CommitType,
    pub remote: String,
}

/// Walk upward from `start` to the nearest directory containing `package.json`.
pub fn find_package_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("package.json").is_file())
        .map(Path::to_path_buf)
}

/// Absolute directory that upward searches for `target` begin from.
fn search_start(target: &Path) -> PathBuf {
    let start = if target.is_dir() {
        target
    } else {
        target.parent().unwrap_or(target)
    };
    let start = if start.as_os_str().is_empty() {
        Path::new(".")
    } else {
        start
    };
    fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf())
}

/// Project root for builds and git commands: the `package.json` ancestor of
/// `target`, else the current directory.
pub fn detect_project_root(target: &Path) -> PathBuf {
    let abs = search_start(target);
    find_package_root(&abs)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or(abs)
}

/// Walk upward from `start` to the nearest directory holding a config file,
/// `package.json`, or `.git`.
pub fn detect_config_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if CONFIG_FILES.iter().any(|f| dir.join(f).exists())
            || dir.join("package.json").exists()
            || dir.join(".git").exists()
        {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

/// Load `MdxpubConfig` from `mdxpub.toml` or `mdxpub.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<MdxpubConfig> {
    let toml_path = root.join("mdxpub.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        return match toml::from_str(&s) {
            Ok(cfg) => Some(cfg),
            Err(err) => {
                tracing::warn!(path = %toml_path.display(), %err, "ignoring invalid config");
                None
            }
        };
    }
    for yml in ["mdxpub.yaml", "mdxpub.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            return match serde_yaml::from_str(&s) {
                Ok(cfg) => Some(cfg),
                Err(err) => {
                    tracing::warn!(path = %p.display(), %err, "ignoring invalid config");
                    None
                }
            };
        }
    }
    None
}

/// Resolve `Effective` for `target` by merging CLI flags, discovered config,
/// and defaults.
pub fn resolve_effective(
    target: &Path,
    cli_output: Option<&str>,
    cli_build: Option<bool>,
    cli_commit_type: Option<CommitType>,
) -> Effective {
    let project_root = detect_project_root(target);
    let cfg = load_config(&detect_config_root(&search_start(target))).unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let build = cli_build.or_else(|| cfg.validate.as_ref().and_then(|v| v.build));
    let warning_limit = cfg
        .validate
        .as_ref()
        .and_then(|v| v.warning_limit)
        .unwrap_or(DEFAULT_WARNING_LIMIT);
    let build_command = cfg
        .build
        .as_ref()
        .and_then(|b| b.command.clone())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_BUILD_COMMAND.iter().map(|s| s.to_string()).collect());
    let build_timeout = Duration::from_secs(
        cfg.build
            .as_ref()
            .and_then(|b| b.timeout_secs)
            .unwrap_or(DEFAULT_BUILD_TIMEOUT_SECS),
    );
    let commit_type = cli_commit_type
        .or_else(|| cfg.publish.as_ref().and_then(|p| p.commit_type))
        .unwrap_or_default();
    let remote = cfg
        .publish
        .as_ref()
        .and_then(|p| p.remote.clone())
        .unwrap_or_else(|| "origin".to_string());

    Effective {
        project_root,
        output,
        build,
        warning_limit,
        build_command,
        build_timeout,
        commit_type,
        remote,
    }
}
