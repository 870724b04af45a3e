//! Clap derive structures for the `topokit` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of workspace crates so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// topokit -- topology tables to canonical JSON and back
#[derive(Debug, Parser)]
#[command(
    name = "topokit",
    version,
    about = "Convert topology CSV tables to a canonical JSON document and back",
    long_about = "Builds a canonical topology document from three CSV tables \
        (nodes, interfaces, networks), validates the tables for structural, \
        referential, duplicate and format problems, exports documents back to \
        tables, and compares documents for semantic equivalence.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "TOPOKIT_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report format (overrides the configured default)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per issue (default)
    Plain,
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportStyleArg {
    /// Every documented column
    Fixed,
    /// Trailing all-empty columns trimmed
    Compact,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a topology document from CSV tables
    Build(BuildArgs),

    /// Check CSV tables (or a document) for integrity problems
    #[command(alias = "check")]
    Validate(ValidateArgs),

    /// Export a topology document back to CSV tables
    Export(ExportArgs),

    /// Compare two topology documents for semantic equivalence
    #[command(alias = "cmp")]
    Compare(CompareArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Print the man page, or install every page into a directory
    Man(ManArgs),
}

// ── Build ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Nodes table
    #[arg(long, value_name = "CSV")]
    pub nodes: PathBuf,

    /// Interfaces table
    #[arg(long, value_name = "CSV")]
    pub interfaces: PathBuf,

    /// Networks table
    #[arg(long, value_name = "CSV")]
    pub networks: PathBuf,

    /// `$schema` reference written into the document
    #[arg(long)]
    pub schema: Option<String>,

    /// Output document path [default: topology.json]
    #[arg(long, value_name = "JSON")]
    pub out: Option<PathBuf>,
}

// ── Validate ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Nodes table
    #[arg(long, value_name = "CSV", required_unless_present = "topology")]
    pub nodes: Option<PathBuf>,

    /// Interfaces table
    #[arg(long, value_name = "CSV", required_unless_present = "topology")]
    pub interfaces: Option<PathBuf>,

    /// Networks table
    #[arg(long, value_name = "CSV", required_unless_present = "topology")]
    pub networks: Option<PathBuf>,

    /// Validate a topology document instead of tables
    #[arg(
        long,
        value_name = "JSON",
        conflicts_with_all = ["nodes", "interfaces", "networks"]
    )]
    pub topology: Option<PathBuf>,
}

// ── Export ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Topology document to export
    #[arg(long, value_name = "JSON")]
    pub topology: PathBuf,

    /// Directory for nodes.csv, interfaces.csv and networks.csv
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub outdir: PathBuf,

    /// Column layout [default: fixed]
    #[arg(long, value_enum)]
    pub style: Option<ExportStyleArg>,

    /// Keep the node_name column on interface rows
    #[arg(long, overrides_with = "no_node_name")]
    pub include_node_name: bool,

    /// Drop the node_name column from interface rows
    #[arg(long, overrides_with = "include_node_name")]
    pub no_node_name: bool,
}

// ── Compare ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// First document
    #[arg(value_name = "LEFT")]
    pub left: PathBuf,

    /// Second document
    #[arg(value_name = "RIGHT")]
    pub right: PathBuf,

    /// Treat nodes, networks and interfaces as unordered
    #[arg(long)]
    pub ignore_order: bool,

    /// Do not print a diff when the documents differ
    #[arg(long)]
    pub no_diff: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the effective configuration as TOML
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Man ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ManArgs {
    /// Write `topokit.1` and one page per subcommand into this directory
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}
