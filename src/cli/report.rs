//! Command output formatting.
//!
//! Summaries go to stdout. Per-key enforcement diagnostics are written by
//! the enforcer itself to stderr while it runs.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, EnforceSummary, ExtractSummary, InitSummary, LocalizeSummary,
    SimulateSummary,
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::{EnforcementMode, KeyCollision},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract(summary, writer),
        CommandSummary::Localize(summary) => print_localize(summary, writer),
        CommandSummary::Enforce(summary) => print_enforce(summary, writer),
        CommandSummary::Simulate(summary) => print_simulate(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}

fn print_extract<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    print_collisions(&summary.collisions, writer);

    match &summary.output {
        Some(path) => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Extracted {} from {} into {}",
                    plural(summary.entries, "string", "strings"),
                    plural(summary.documents, "document", "documents"),
                    path.display()
                )
                .green()
            );
        }
        None => {
            let _ = writeln!(
                writer,
                "{} No translatable content found in {}",
                "warning:".bold().yellow(),
                plural(summary.documents, "document", "documents")
            );
        }
    }
}

fn print_collisions<W: Write>(collisions: &[KeyCollision], writer: &mut W) {
    for collision in collisions {
        let _ = writeln!(
            writer,
            "{} key {} is shared by {:?} and {:?}; keeping {:?}",
            "warning:".bold().yellow(),
            collision.key.bold(),
            collision.replaced,
            collision.kept,
            collision.kept
        );
    }
    if !collisions.is_empty() {
        let _ = writeln!(
            writer,
            "  {} {}",
            "=".blue(),
            "hint: increase 'hashLength' to avoid key collisions".cyan()
        );
    }
}

fn print_localize<W: Write>(summary: &LocalizeSummary, writer: &mut W) {
    if summary.locales.is_empty() {
        let _ = writeln!(
            writer,
            "{} No target locales found; nothing to localize",
            "warning:".bold().yellow()
        );
        return;
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Localized {} into {} ({})",
            plural(summary.documents, "document", "documents"),
            plural(summary.written, "file", "files"),
            summary.locales.join(", ")
        )
        .green()
    );
}

fn print_enforce<W: Write>(summary: &EnforceSummary, writer: &mut W) {
    if let Some((locales, missing)) = summary.failed {
        let _ = writeln!(
            writer,
            "{} {} missing across {}",
            FAILURE_MARK.red(),
            plural(missing, "translation", "translations"),
            plural(locales, "locale", "locales")
        );
        return;
    }

    if summary.mode == EnforcementMode::Silent {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Enforcement is silent; no checks run".green()
        );
        return;
    }

    let missing: usize = summary.reports.iter().map(|r| r.missing.len()).sum();
    if missing == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} - no missing translations",
                plural(summary.locale_files, "locale file", "locale files")
            )
            .green()
        );
    } else {
        let incomplete = summary.reports.iter().filter(|r| !r.is_complete()).count();
        let _ = writeln!(
            writer,
            "{} {} missing across {}",
            "warning:".bold().yellow(),
            plural(missing, "translation", "translations"),
            plural(incomplete, "locale", "locales")
        );
    }
}

fn print_simulate<W: Write>(summary: &SimulateSummary, writer: &mut W) {
    for locale in &summary.skipped {
        let _ = writeln!(
            writer,
            "{} skipped '{}': it is the native locale",
            "warning:".bold().yellow(),
            locale
        );
    }
    for path in &summary.written {
        let _ = writeln!(writer, "  {} {}", "wrote".dimmed(), path.display());
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Simulated {}",
            plural(summary.written.len(), "locale", "locales")
        )
        .green()
    );
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}
