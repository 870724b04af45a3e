//! `compare`: semantic equivalence of two documents.

use topokit_core::compare::{OrderPolicy, compare_files};

use super::Context;
use crate::cli::CompareArgs;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &CompareArgs, ctx: &Context) -> Result<(), CliError> {
    let policy =
        OrderPolicy::from_ignore_order(args.ignore_order || ctx.config.compare.ignore_order);
    let show_diff = !args.no_diff && ctx.config.compare.show_diff;

    let left = args.left.display().to_string();
    let right = args.right.display().to_string();
    let cmp = compare_files(&args.left, &args.right, policy)?;

    if cmp.equivalent {
        ctx.print(&format!("{left} and {right} are equivalent"));
        return Ok(());
    }

    if show_diff {
        if let Some(diff) = cmp.diff(&left, &right) {
            ctx.print(&output::render_diff(&diff, ctx.color));
        }
    }
    Err(CliError::DocumentsDiffer { left, right })
}
