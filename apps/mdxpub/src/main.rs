//! mdxpub CLI binary entry point.
//! Delegates to library modules for validate/publish and prints results.

use clap::Parser;
use mdxpub::build_check::{build_issues, BuildCheck};
use mdxpub::cli::{Cli, Commands};
use mdxpub::git::GitCli;
use mdxpub::publish::{PublishOptions, PublishOutcome, Publisher};
use mdxpub::{config, output, utils, validate};
use std::path::Path;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn require_path(path: &str) -> &Path {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!(
            "{} Path does not exist: {}",
            utils::error_prefix(),
            p.display()
        );
        std::process::exit(1);
    }
    p
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Validate {
            path,
            build,
            no_build,
            output,
        } => {
            let target = require_path(&path);
            let eff = config::resolve_effective(
                target,
                output.as_deref(),
                Commands::build_override(build, no_build),
                None,
            );
            let human = eff.output != "json";

            let docs = validate::discover_documents(target);
            if target.is_file() && docs.is_empty() {
                eprintln!(
                    "{} Skipping non-MDX file: {}",
                    utils::note_prefix(),
                    target.display()
                );
                std::process::exit(0);
            }
            if target.is_dir() && docs.is_empty() {
                eprintln!(
                    "{} No MDX files found in: {}",
                    utils::note_prefix(),
                    target.display()
                );
                std::process::exit(0);
            }
            if human {
                eprintln!(
                    "{} Found {} MDX files to validate",
                    utils::info_prefix(),
                    docs.len()
                );
            }

            let mut report = validate::run_validation(&docs);

            // Without an explicit choice, only directory targets get a build check
            if eff.build.unwrap_or_else(|| target.is_dir()) {
                if human {
                    eprintln!(
                        "{} Running build validation (this may take a while)...",
                        utils::info_prefix()
                    );
                }
                let check = BuildCheck::new(eff.build_command.clone(), eff.build_timeout);
                let start = if target.is_dir() {
                    target
                } else {
                    target.parent().unwrap_or(target)
                };
                let abs = std::fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
                report.extend(build_issues(&check, &abs));
            }

            output::print_validation(&report, &eff.output, eff.warning_limit);
            if report.has_errors() {
                std::process::exit(1);
            }
        }
        Commands::Publish {
            path,
            push,
            commit_type,
            skip_build,
            skip_validation,
            output,
        } => {
            let target = require_path(&path);
            let eff = config::resolve_effective(target, output.as_deref(), None, commit_type);
            let vcs = GitCli::new(&eff.project_root);
            let check = BuildCheck::new(eff.build_command.clone(), eff.build_timeout);
            let opts = PublishOptions {
                push,
                commit_type: eff.commit_type,
                skip_build,
                skip_validation,
                remote: eff.remote.clone(),
                output: eff.output.clone(),
                warning_limit: eff.warning_limit,
            };
            let publisher = Publisher::new(&vcs, &check, eff.project_root.clone(), opts);
            let stdin = std::io::stdin();
            match publisher.run(target, &mut stdin.lock()) {
                Ok(PublishOutcome::Pushed { .. }) => {
                    eprintln!("{} Publish complete!", utils::ok_prefix());
                }
                Ok(_) => {}
                Err(err) => {
                    eprintln!("{} {}", utils::error_prefix(), err);
                    std::process::exit(err.exit_code());
                }
            }
        }
    }
}
