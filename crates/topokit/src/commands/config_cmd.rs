//! Config subcommand handlers.

use topokit_config::{config_path, load_config, to_toml};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            let path = global.config.clone().unwrap_or_else(config_path);
            output::print_output(&path.display().to_string(), global.quiet);
        }
        ConfigCommand::Show => {
            let cfg = load_config(global.config.as_deref())?;
            output::print_output(to_toml(&cfg)?.trim_end(), global.quiet);
        }
    }
    Ok(())
}
