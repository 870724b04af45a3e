//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use topokit_config::ConfigError;
use topokit_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────

    #[error("Cannot use input {path}")]
    #[diagnostic(
        code(topokit::invalid_input),
        help(
            "Check that the file exists and is readable.\n\
             Tables need a header row; documents must be valid JSON."
        )
    )]
    InvalidInput {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{message}")]
    #[diagnostic(
        code(topokit::unresolved_node),
        help(
            "Every interface row needs a node_id or node_name matching a node row.\n\
             Run: topokit validate --nodes <CSV> --interfaces <CSV> --networks <CSV>"
        )
    )]
    UnresolvedNode { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Validation failed: {summary}")]
    #[diagnostic(
        code(topokit::validation_failed),
        help("Fix the errors listed above and run validate again.")
    )]
    ValidationFailed { summary: String },

    #[error("Refusing to build {out}: {summary}")]
    #[diagnostic(
        code(topokit::build_refused),
        help(
            "Nothing was written. Fix the errors listed above, or inspect them with:\n\
             topokit validate --nodes <CSV> --interfaces <CSV> --networks <CSV>"
        )
    )]
    BuildRefused { out: String, summary: String },

    // ── Comparison ───────────────────────────────────────────────────

    #[error("{left} and {right} are not equivalent")]
    #[diagnostic(
        code(topokit::documents_differ),
        help("Use --ignore-order if only the order of nodes, networks or interfaces differs.")
    )]
    DocumentsDiffer { left: String, right: String },

    // ── Output ───────────────────────────────────────────────────────

    #[error("Cannot write {path}")]
    #[diagnostic(code(topokit::write_failed))]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Invalid configuration")]
    #[diagnostic(
        code(topokit::config),
        help(
            "Check the config file shown by `topokit config path` and any \
             TOPOKIT_* environment variables."
        )
    )]
    Config(#[source] ConfigError),

    #[error("Invalid setting {key} = '{value}'")]
    #[diagnostic(code(topokit::invalid_setting), help("Expected one of: {expected}"))]
    InvalidSetting {
        key: String,
        value: String,
        expected: String,
    },

    // ── Usage ────────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(topokit::usage), help("Run: topokit --help"))]
    Usage { message: String },

    // ── Serialization ────────────────────────────────────────────────

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(topokit::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput { .. }
            | Self::Config(_)
            | Self::InvalidSetting { .. }
            | Self::Usage { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io { path, source } => Self::InvalidInput {
                path,
                source: source.into(),
            },
            CoreError::Csv { path, source } => Self::InvalidInput {
                path,
                source: source.into(),
            },
            CoreError::Json { path, source } => Self::InvalidInput {
                path,
                source: source.into(),
            },
            err @ CoreError::UnresolvedNode { .. } => Self::UnresolvedNode {
                message: err.to_string(),
            },
            CoreError::Write { path, source } => Self::WriteFailed { path, source },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
