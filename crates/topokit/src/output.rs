//! Output formatting: plain, table, JSON, YAML.
//!
//! Renders validation reports and comparison diffs in the format selected by
//! `--output`. Table uses `tabled`, structured formats use serde.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use topokit_core::{Issue, Severity, ValidationReport};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn severity_label(severity: Severity, color: bool) -> String {
    let label = severity.to_string();
    match (severity, color) {
        (_, false) => label,
        (Severity::Error, true) => label.red().bold().to_string(),
        (Severity::Warning, true) => label.yellow().bold().to_string(),
    }
}

// ── Validation reports ───────────────────────────────────────────────

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Line")]
    line: u64,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&Issue> for IssueRow {
    fn from(issue: &Issue) -> Self {
        Self {
            severity: issue.severity().to_string(),
            kind: issue.kind.to_string(),
            table: issue.location.table.to_string(),
            line: issue.location.line,
            message: issue.message.clone(),
        }
    }
}

/// Render a validation report in the chosen format.
///
/// Plain and table output end with a one-line summary.
pub fn render_report(
    format: OutputFormat,
    report: &ValidationReport,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Plain => {
            let mut lines: Vec<String> = report
                .issues()
                .map(|issue| format!("{}: {issue}", severity_label(issue.severity(), color)))
                .collect();
            lines.push(report.summary());
            Ok(lines.join("\n"))
        }
        OutputFormat::Table => {
            let rows: Vec<IssueRow> = report.issues().map(IssueRow::from).collect();
            if rows.is_empty() {
                return Ok(format!("No issues found ({})", report.summary()));
            }
            Ok(format!("{}\n{}", render_table(&rows), report.summary()))
        }
        OutputFormat::Json => render_json_pretty(report),
        OutputFormat::Yaml => render_yaml(report),
    }
}

// ── Diffs ────────────────────────────────────────────────────────────

/// Colorize a unified diff line by line.
pub fn render_diff(diff: &str, color: bool) -> String {
    if !color {
        return diff.trim_end().to_owned();
    }
    diff.lines()
        .map(|line| {
            if line.starts_with("+++") || line.starts_with("---") {
                line.bold().to_string()
            } else if line.starts_with('+') {
                line.green().to_string()
            } else if line.starts_with('-') {
                line.red().to_string()
            } else if line.starts_with("@@") {
                line.cyan().to_string()
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(
    data: &T,
) -> Result<String, CliError> {
    serde_json::to_string_pretty(data).map_err(|e| CliError::Render(e.to_string()))
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}
