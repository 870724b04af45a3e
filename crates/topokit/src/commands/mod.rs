//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod build;
pub mod compare;
pub mod config_cmd;
pub mod export;
pub mod man;
pub mod validate;

use clap::{CommandFactory, ValueEnum};

use topokit_config::Config;

use crate::cli::{Cli, ColorMode, Command, CompletionsArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Effective settings for one invocation: layered config with global flags
/// applied on top.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Context {
    pub fn load(global: &GlobalOpts) -> Result<Self, CliError> {
        let config = topokit_config::load_config(global.config.as_deref())?;

        let format = match global.output {
            Some(format) => format,
            None => parse_setting("output.format", &config.output.format)?,
        };
        let color = match global.color {
            Some(mode) => mode,
            None => parse_setting::<ColorMode>("output.color", &config.output.color)?,
        };

        Ok(Self {
            config,
            format,
            color: output::should_color(color),
            quiet: global.quiet,
        })
    }

    pub fn print(&self, rendered: &str) {
        output::print_output(rendered, self.quiet);
    }
}

/// Parse a configured string the same way clap parses the matching flag.
fn parse_setting<T: ValueEnum>(key: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|_| CliError::InvalidSetting {
        key: key.into(),
        value: value.into(),
        expected: T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_owned())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Dispatch a parsed command to its handler.
pub fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    tracing::debug!(command = ?cmd, "dispatching command");
    match cmd {
        Command::Build(args) => build::handle(args, &Context::load(global)?),
        Command::Validate(args) => validate::handle(args, &Context::load(global)?),
        Command::Export(args) => export::handle(&args, &Context::load(global)?),
        Command::Compare(args) => compare::handle(&args, &Context::load(global)?),
        Command::Config(args) => config_cmd::handle(&args, global),
        Command::Completions(args) => {
            completions(&args);
            Ok(())
        }
        Command::Man(args) => man::handle(&args, global.quiet),
    }
}

fn completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "topokit", &mut std::io::stdout());
}
