//! `export`: canonical document -> CSV tables.

use topokit_core::Document;
use topokit_core::export::{ExportOptions, ExportStyle, write_tables};

use super::Context;
use crate::cli::{ExportArgs, ExportStyleArg};
use crate::error::CliError;

impl From<ExportStyleArg> for ExportStyle {
    fn from(arg: ExportStyleArg) -> Self {
        match arg {
            ExportStyleArg::Fixed => Self::Fixed,
            ExportStyleArg::Compact => Self::Compact,
        }
    }
}

/// Flags win over config; the last of `--include-node-name` and
/// `--no-node-name` wins over the other.
fn options(args: &ExportArgs, ctx: &Context) -> ExportOptions {
    let include_node_name = if args.include_node_name {
        true
    } else if args.no_node_name {
        false
    } else {
        ctx.config.export.include_node_name
    };
    ExportOptions {
        style: args.style.map_or(ctx.config.export.style, ExportStyle::from),
        include_node_name,
    }
}

pub fn handle(args: &ExportArgs, ctx: &Context) -> Result<(), CliError> {
    let doc = Document::read(&args.topology)?;
    let opts = options(args, ctx);
    tracing::debug!(?opts, outdir = %args.outdir.display(), "exporting");

    for path in write_tables(&doc, opts, &args.outdir)? {
        ctx.print(&format!("Wrote {}", path.display()));
    }
    Ok(())
}
