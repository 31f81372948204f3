//! Output rendering for validation reports and publish summaries.
//!
//! Supports `human` (default) and `json` outputs. The JSON form carries the
//! full issue list and a top-level summary; the human form truncates the
//! warning list to a configurable limit.

use crate::models::change::{ChangeSet, CommitPlan};
use crate::models::{Issue, ReportView, ValidationReport};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

const RULE: &str =
    "================================================================================";

fn use_colors(output: &str) -> bool {
    output != "json" && utils::use_colors()
}

fn print_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(err) => eprintln!("{} failed to render JSON: {}", utils::error_prefix(), err),
    }
}

fn heading(title: &str, color: bool) {
    println!("\n{}", RULE);
    if color {
        println!("{}", title.bold());
    } else {
        println!("{}", title);
    }
    println!("{}", RULE);
}

fn print_issue(issue: &Issue, label: &str) {
    println!("  File: {}:{}", issue.file, issue.line);
    println!("  {}: {}", label, issue.message);
    println!();
}

/// Warnings shown in human output, plus how many were left out.
pub fn shown_warnings(report: &ValidationReport, limit: usize) -> (Vec<&Issue>, usize) {
    let all: Vec<&Issue> = report.warnings().collect();
    let hidden = all.len().saturating_sub(limit);
    (all.into_iter().take(limit).collect(), hidden)
}

/// Verdict line for the end of a report.
pub fn verdict(report: &ValidationReport) -> &'static str {
    if report.has_errors() {
        "Validation failed due to errors"
    } else if report.warning_count() > 0 {
        "All files passed validation (with warnings)"
    } else {
        "All files passed validation with no issues!"
    }
}

/// Print a validation report in the requested format.
pub fn print_validation(report: &ValidationReport, output: &str, warning_limit: usize) {
    if output == "json" {
        print_json(&compose_validation_json(report));
        return;
    }
    let color = use_colors(output);
    heading("MDX VALIDATION REPORT", color);

    let errors: Vec<&Issue> = report.errors().collect();
    if !errors.is_empty() {
        let title = format!("\n✖ ERRORS ({}):", errors.len());
        if color {
            println!("{}", title.red().bold());
        } else {
            println!("{}", title);
        }
        for e in errors {
            print_issue(e, "Error");
        }
    }

    let (warnings, hidden) = shown_warnings(report, warning_limit);
    if !warnings.is_empty() || hidden > 0 {
        let title = format!("\n▲ WARNINGS ({}):", report.warning_count());
        if color {
            println!("{}", title.yellow().bold());
        } else {
            println!("{}", title);
        }
        for w in warnings {
            print_issue(w, "Warning");
        }
        if hidden > 0 {
            println!("  ... and {} more warnings", hidden);
        }
    }

    let s = report.summary();
    println!("\nSUMMARY:");
    println!("  Files checked: {}", s.files_checked);
    println!("  Files valid: {}", s.files_valid);
    println!("  Errors: {}", s.errors);
    println!("  Warnings: {}", s.warnings);

    let v = verdict(report);
    if !color {
        println!("\n{}", v);
    } else if report.has_errors() {
        println!("\n{}", v.red().bold());
    } else {
        println!("\n{}", v.green().bold());
    }
    println!("{}", RULE);
}

/// Compose validation JSON object (pure) for testing/snapshot purposes.
pub fn compose_validation_json(report: &ValidationReport) -> JsonVal {
    serde_json::to_value(ReportView::from(report)).unwrap_or(JsonVal::Null)
}

/// Compose publish summary JSON object (pure) for testing/snapshot purposes.
///
/// `validation` is the in-process MDX report when validation ran, else null.
pub fn compose_publish_json(
    changes: &ChangeSet,
    plan: &CommitPlan,
    push: bool,
    validation: Option<&ValidationReport>,
) -> JsonVal {
    json!({
        "changes": changes.records(),
        "validation": validation.map(compose_validation_json),
        "commit": {
            "type": plan.primary_type,
            "headline": plan.headline,
            "message": plan.message(),
        },
        "push": push,
    })
}

/// Print detected changes, the synthesized message, and planned actions.
pub fn print_publish_summary(
    changes: &ChangeSet,
    plan: &CommitPlan,
    push: bool,
    validation: Option<&ValidationReport>,
    output: &str,
) {
    if output == "json" {
        print_json(&compose_publish_json(changes, plan, push, validation));
        return;
    }
    let color = use_colors(output);
    heading("ARTICLE PUBLISH SUMMARY", color);

    if !changes.is_empty() {
        println!("\nChanges detected ({} files):", changes.len());
        for r in changes.records() {
            let locales = r
                .locales
                .iter()
                .map(|l| l.code())
                .collect::<Vec<_>>()
                .join(", ");
            if color {
                println!("  - {} [{}]", r.file.bold(), locales);
            } else {
                println!("  - {} [{}]", r.file, locales);
            }
        }
    }

    println!("\nGenerated commit message:\n");
    for line in plan.message().lines() {
        println!("    {}", line);
    }

    println!("\nActions:");
    if changes.is_empty() {
        println!("  No changes detected");
    } else {
        println!("  ✓ Validate MDX");
        println!("  ✓ Run build check");
        if push {
            println!("  ✓ Create semantic commit");
            println!("  ✓ Push to remote");
        } else {
            println!("  ✓ Create semantic commit (dry run)");
            println!("  ⏭  Push (use --push to enable)");
        }
    }
    println!("{}", RULE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::commit::synthesize;
    use crate::models::change::CommitType;
    use crate::models::Rule;

    fn report_with_warnings(n: usize) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.record_file(
            (0..n)
                .map(|i| Issue::warning("a.mdx", i + 1, Rule::BareAngleBracket, "w"))
                .collect(),
        );
        report
    }

    #[test]
    fn warnings_are_truncated_to_limit() {
        let report = report_with_warnings(12);
        let (shown, hidden) = shown_warnings(&report, 10);
        assert_eq!(shown.len(), 10);
        assert_eq!(shown[9].line, 10);
        assert_eq!(hidden, 2);
        let (shown, hidden) = shown_warnings(&report, 20);
        assert_eq!((shown.len(), hidden), (12, 0));
    }

    #[test]
    fn verdicts() {
        assert_eq!(
            verdict(&ValidationReport::new()),
            "All files passed validation with no issues!"
        );
        assert_eq!(
            verdict(&report_with_warnings(1)),
            "All files passed validation (with warnings)"
        );
    }

    #[test]
    fn test_compose_validation_json_shape() {
        let out = compose_validation_json(&report_with_warnings(2));
        assert_eq!(out["summary"]["warnings"], 2);
        assert_eq!(out["summary"]["files_checked"], 1);
        assert_eq!(out["issues"][1]["line"], 2);
    }

    #[test]
    fn test_compose_publish_json_shape() {
        let changes: ChangeSet = vec![classify("content/docs/zh/analyzing-x.mdx")]
            .into_iter()
            .collect();
        let plan = synthesize(&changes, CommitType::Docs);
        let out = compose_publish_json(&changes, &plan, true, None);
        assert_eq!(out["commit"]["type"], "feat");
        assert_eq!(out["changes"][0]["category"], "skill-analysis");
        assert_eq!(out["changes"][0]["locales"][0], "zh");
        assert_eq!(out["push"], true);
    }

    #[test]
    fn publish_json_nests_validation_report() {
        let changes: ChangeSet = vec![classify("content/docs/en/guide.mdx")]
            .into_iter()
            .collect();
        let plan = synthesize(&changes, CommitType::Docs);
        let report = report_with_warnings(3);
        let out = compose_publish_json(&changes, &plan, false, Some(&report));
        assert_eq!(out["validation"]["summary"]["warnings"], 3);
        assert_eq!(out["validation"]["issues"][2]["line"], 3);
        assert_eq!(out["commit"]["headline"], "docs: publish guide");
    }
}
