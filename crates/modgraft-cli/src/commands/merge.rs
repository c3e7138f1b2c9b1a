//! Handler for `modgraft --dest <FILE> --src <FILE>`.

use std::io::Write;
use std::path::Path;

use modgraft_core::config::GraftConfig;
use modgraft_merge::report::Decision;
use modgraft_ops::ops_merge::{self, MergeFileOptions};
use modgraft_util::errors::{GraftError, GraftResult};
use modgraft_util::status::{self, Tone};

pub fn exec(
    dest: Option<&Path>,
    src: Option<&Path>,
    force_overwrite: bool,
    config: Option<&Path>,
    quiet: bool,
) -> GraftResult<()> {
    let (dest, src) = match (dest, src) {
        (Some(dest), Some(src)) => (dest, src),
        (None, _) => {
            return Err(GraftError::Usage {
                message: "a destination file is required (--dest)".to_string(),
            }
            .into())
        }
        (_, None) => {
            return Err(GraftError::Usage {
                message: "a source file is required (--src)".to_string(),
            }
            .into())
        }
    };

    let config = GraftConfig::load(config)?;
    let quiet = quiet || config.diagnostics.quiet;
    let force_overwrite = force_overwrite || config.merge.force_overwrite;
    tracing::debug!(
        dest = %dest.display(),
        src = %src.display(),
        force_overwrite,
        quiet,
        "resolved merge invocation"
    );

    let outcome = ops_merge::merge_files(&MergeFileOptions {
        dest: dest.to_path_buf(),
        src: src.to_path_buf(),
        force_overwrite,
    })?;

    if !quiet {
        for decision in &outcome.report {
            print_decision(decision);
        }
    }

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(outcome.output.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(GraftError::Io)?;
    Ok(())
}

fn print_decision(decision: &Decision) {
    let tone = match decision {
        Decision::RequireVersionChanged { forced: true, .. }
        | Decision::RequireDuplicateDropped { .. } => Tone::Warn,
        d if d.is_noop() => Tone::Info,
        _ => Tone::Action,
    };
    let message = format!("{} {}", decision.section(), decision.subject());
    status::status(tone, decision.label(), &message);
}
