//! Formatting functions for UI output.
//!
//! `format_*` functions build the text and are tested directly; `display_*`
//! functions print it. Colors come from `console` and follow its global switch.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::BumpPlan;
use crate::domain::{BumpStrategy, SemanticVersion};
use crate::error::SemverError;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    display_warning(&warning.to_string());
}

/// Display the version change and every planned replacement.
pub fn display_plan(plan: &BumpPlan) {
    print!("{}", format_plan(plan));
}

/// Display what each strategy would do to `current`.
pub fn display_strategy_tree(
    current: &SemanticVersion,
    entries: &[(BumpStrategy, Result<SemanticVersion, SemverError>)],
) {
    print!("{}", format_strategy_tree(current, entries));
}

/// Display versions, newest first, marking the latest.
pub fn display_history(versions: &[SemanticVersion]) {
    print!("{}", format_history(versions));
}

/// Render a bump plan:
///
/// ```text
/// Version: 1.2.3 --> 1.3.0
///   VERSION
///        Find: "1.2.3"
///     Replace: "1.3.0" (1 occurrence)
/// ```
pub fn format_plan(plan: &BumpPlan) -> String {
    let verb = if plan.is_reset { "Reset" } else { "Version" };
    let mut out = format!(
        "{}: {} --> {}\n",
        style(verb).bold(),
        style(&plan.old_version).red(),
        style(&plan.new_version).green()
    );

    for change in &plan.changes {
        let plural = if change.occurrences == 1 { "" } else { "s" };
        out.push_str(&format!("  {}\n", style(&change.display_path).cyan()));
        out.push_str(&format!("       Find: \"{}\"\n", change.find));
        out.push_str(&format!(
            "    Replace: \"{}\" ({} occurrence{})\n",
            change.replace, change.occurrences, plural
        ));
    }
    out
}

/// Render the potential versioning paths from `current` as a tree
pub fn format_strategy_tree(
    current: &SemanticVersion,
    entries: &[(BumpStrategy, Result<SemanticVersion, SemverError>)],
) -> String {
    let head = format!("{} ── bump ─", current);
    let indent = " ".repeat(head.chars().count());
    let width = entries
        .iter()
        .map(|(strategy, _)| strategy.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, (strategy, result)) in entries.iter().enumerate() {
        let branch = match (i, entries.len()) {
            (_, 1) => "──",
            (0, _) => "┬─",
            (i, n) if i + 1 == n => "╰─",
            _ => "├─",
        };
        let prefix = if i == 0 { head.as_str() } else { indent.as_str() };
        let fill = "─".repeat(width - strategy.as_str().len() + 1);
        let outcome = match result {
            Ok(version) => style(version.to_string()).green().to_string(),
            Err(e) => style(format!("({})", e)).dim().to_string(),
        };
        out.push_str(&format!(
            "{}{} {} {} {}\n",
            prefix,
            branch,
            style(strategy.as_str()).blue(),
            fill,
            outcome
        ));
    }
    out
}

/// Render versions one per line, newest first
pub fn format_history(versions: &[SemanticVersion]) -> String {
    let mut out = String::new();
    for (i, version) in versions.iter().enumerate() {
        if i == 0 {
            out.push_str(&format!("  {} (latest)\n", style(version).green().bold()));
        } else {
            out.push_str(&format!("  {}\n", version));
        }
    }
    out
}
