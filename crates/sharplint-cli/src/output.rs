//! Output formatting and reporting

use colored::Colorize;
use serde::Serialize;
use sharplint_core::diagnostics::{Diagnostic, Severity};

use crate::OutputFormat;

/// Summary statistics for linting results
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintSummary {
    pub files_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub hints: usize,
    pub fixes_applied: usize,
}

impl LintSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.info += 1,
            Severity::Hint => self.hints += 1,
        }
    }

    pub fn total_issues(&self) -> usize {
        self.errors + self.warnings + self.info + self.hints
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format and print linting results
    pub fn print_results(&self, diagnostics: &[Diagnostic], summary: &LintSummary) {
        match self.format {
            OutputFormat::Text => self.print_text(diagnostics, summary),
            OutputFormat::Json => self.print_json(diagnostics, summary),
        }
    }

    fn print_text(&self, diagnostics: &[Diagnostic], summary: &LintSummary) {
        for diagnostic in diagnostics {
            let severity = match diagnostic.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
                Severity::Info => "info".blue().bold(),
                Severity::Hint => "hint".cyan(),
            };
            println!(
                "{severity}[{}] {}: {}",
                diagnostic.rule_id.dimmed(),
                diagnostic.location,
                diagnostic.message
            );
            for suggestion in &diagnostic.suggestions {
                println!("    {} {}", "fix:".green(), suggestion.message);
            }
        }

        println!();
        if summary.total_issues() == 0 {
            println!("{} no issues found", "ok:".green().bold());
        } else {
            println!(
                "{} {} error(s), {} warning(s) across {} file(s)",
                "summary:".bold(),
                summary.errors,
                summary.warnings,
                summary.files_checked
            );
        }
        if summary.fixes_applied > 0 {
            println!("{} {} fix(es) applied", "fixed:".green(), summary.fixes_applied);
        }
    }

    fn print_json(&self, diagnostics: &[Diagnostic], summary: &LintSummary) {
        #[derive(Serialize)]
        struct Report<'a> {
            diagnostics: &'a [Diagnostic],
            summary: &'a LintSummary,
        }
        let report = Report {
            diagnostics,
            summary,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => tracing::error!(error = %err, "failed to serialize report"),
        }
    }
}
