//! CLI argument parsing via `clap`.

use crate::models::change::CommitType;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mdxpub",
    version,
    about = "Validate MDX docs and publish them with semantic commits",
    long_about = "mdxpub — validate MDX documentation (frontmatter, escaping, tag balance) and publish changed articles behind a build check with a synthesized semantic commit.\n\nConfiguration precedence: CLI > mdxpub.toml > defaults.",
    after_help = "Examples:\n  mdxpub validate content/docs/en/development/article.mdx\n  mdxpub validate content/docs/en/ --no-build\n  mdxpub publish content/docs/en/development/article.mdx --push --type feat",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for validation and publishing.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current mdxpub version.")]
    Version,
    /// Validate MDX files
    #[command(
        about = "Validate MDX files",
        long_about = "Check frontmatter, unescaped characters, and tag balance for one MDX file or every MDX file under a directory. Errors fail the run; warnings never do.",
        after_help = "Examples:\n  mdxpub validate content/docs/en/\n  mdxpub validate content/docs/en/guide.mdx --build\n  mdxpub validate content/docs/ --output json"
    )]
    Validate {
        #[arg(help = "MDX file or directory to validate")]
        path: String,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Run the build check (default for directories)")]
        build: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Skip the build check")]
        no_build: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Publish changed articles
    #[command(
        about = "Publish changed articles",
        long_about = "Detect changed MDX files, run build and MDX validation, then create a semantic commit. With --push, confirm interactively and push to the configured remote.",
        after_help = "Examples:\n  mdxpub publish content/docs/en/development/article.mdx\n  mdxpub publish content/docs/ --push\n  mdxpub publish content/docs/en/article.mdx --type fix --skip-build"
    )]
    Publish {
        #[arg(help = "MDX file or directory to publish")]
        path: String,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Push to remote after commit (asks for confirmation)")]
        push: bool,
        #[arg(long = "type", value_enum, help = "Commit type (default: docs)")]
        commit_type: Option<CommitType>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Skip build validation")]
        skip_build: bool,
        #[arg(long, visible_alias = "skip-mdx", action = clap::ArgAction::SetTrue, help = "Skip MDX validation")]
        skip_validation: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

impl Commands {
    /// Build-check override implied by `validate` flags. `--no-build` wins.
    pub fn build_override(build: bool, no_build: bool) -> Option<bool> {
        if no_build {
            Some(false)
        } else if build {
            Some(true)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_publish_flags_and_aliases() {
        let cli = Cli::try_parse_from([
            "mdxpub", "publish", "docs/", "--push", "--type", "feature", "--skip-mdx",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Publish {
                push,
                commit_type,
                skip_validation,
                skip_build,
                ..
            } => {
                assert!(push);
                assert_eq!(commit_type, Some(CommitType::Feat));
                assert!(skip_validation);
                assert!(!skip_build);
            }
            _ => panic!("expected publish"),
        }
    }

    #[test]
    fn rejects_unknown_commit_type() {
        assert!(Cli::try_parse_from(["mdxpub", "publish", "x.mdx", "--type", "perf"]).is_err());
    }

    #[test]
    fn build_override_precedence() {
        assert_eq!(Commands::build_override(true, true), Some(false));
        assert_eq!(Commands::build_override(true, false), Some(true));
        assert_eq!(Commands::build_override(false, false), None);
    }
}
