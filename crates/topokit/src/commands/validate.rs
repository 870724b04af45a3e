//! `validate`: report integrity problems in tables or a document.

use topokit_core::validate::{validate, validate_document};
use topokit_core::{Document, RowSet, TablePaths};

use super::Context;
use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ValidateArgs, ctx: &Context) -> Result<(), CliError> {
    let report = match (args.topology, args.nodes, args.interfaces, args.networks) {
        (Some(topology), ..) => validate_document(&Document::read(&topology)?),
        (None, Some(nodes), Some(interfaces), Some(networks)) => {
            let rows = RowSet::read(&TablePaths {
                nodes,
                interfaces,
                networks,
            })?;
            validate(&rows)
        }
        _ => {
            return Err(CliError::Usage {
                message: "validate needs --nodes, --interfaces and --networks, or --topology"
                    .into(),
            });
        }
    };

    ctx.print(&output::render_report(ctx.format, &report, ctx.color)?);

    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            summary: report.summary(),
        })
    }
}
