//! mdxpub core library.
//!
//! This crate exposes programmatic APIs for validating MDX documentation and
//! publishing changed articles with a synthesized semantic commit.
//!
//! High-level modules:
//! - `scan`: Frontmatter splitting and fence-aware line scanning.
//! - `checks`: Frontmatter, content, and tag-balance checks for one document.
//! - `validate`: Document discovery and run aggregation into a report.
//! - `build_check`: External build invocation with a hard timeout.
//! - `classify`: Path-based change category and locale detection.
//! - `commit`: Deterministic commit message synthesis.
//! - `git`: Version-control collaborator.
//! - `publish`: The gated publish pipeline.
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Issues, reports, and change-set data models.
//! - `output`: Human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `utils`: Supporting helpers.
pub mod build_check;
pub mod checks;
pub mod classify;
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod models;
pub mod output;
pub mod publish;
pub mod scan;
pub mod utils;
pub mod validate;
