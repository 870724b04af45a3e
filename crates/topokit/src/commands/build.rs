//! `build`: tables -> validated canonical document.

use topokit_core::validate::validate;
use topokit_core::{RowSet, TablePaths, ingest};

use super::Context;
use crate::cli::BuildArgs;
use crate::error::CliError;
use crate::output;

pub fn handle(args: BuildArgs, ctx: &Context) -> Result<(), CliError> {
    let paths = TablePaths {
        nodes: args.nodes,
        interfaces: args.interfaces,
        networks: args.networks,
    };
    let out = args.out.unwrap_or_else(|| ctx.config.build.out.clone());
    let rows = RowSet::read(&paths)?;

    let report = validate(&rows);
    if !report.is_valid() {
        ctx.print(&output::render_report(ctx.format, &report, ctx.color)?);
        return Err(CliError::BuildRefused {
            out: out.display().to_string(),
            summary: report.summary(),
        });
    }
    if !report.warnings.is_empty() {
        ctx.print(&output::render_report(ctx.format, &report, ctx.color)?);
    }

    let schema = args
        .schema
        .unwrap_or_else(|| ctx.config.build.schema.clone());
    let doc = ingest(&rows, schema)?;
    doc.write(&out)?;

    ctx.print(&format!(
        "Wrote {} ({} nodes, {} interfaces, {} networks)",
        out.display(),
        doc.nodes.len(),
        doc.interface_count(),
        doc.networks.len()
    ));
    Ok(())
}
