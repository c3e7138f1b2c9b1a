//! Command dispatch and handler modules.

mod merge;

use modgraft_util::errors::GraftResult;

use crate::cli::Cli;

/// Route a parsed CLI invocation to the merge handler.
pub fn dispatch(cli: Cli) -> GraftResult<()> {
    merge::exec(
        cli.dest.as_deref(),
        cli.src.as_deref(),
        cli.force_overwrite,
        cli.config.as_deref(),
        cli.quiet,
    )
}
