//! Merge engine: folds a source manifest into a destination manifest.
//!
//! Three passes run in order, each over its own section:
//! [`require::merge_requires`], [`replace::merge_replacements`] and
//! [`exclude::merge_excludes`]. Every decision is recorded in a
//! [`report::MergeReport`] instead of being printed, so callers decide how
//! (and whether) to show it.

pub mod exclude;
pub mod replace;
pub mod report;
pub mod require;

use modgraft_core::manifest::Manifest;
use modgraft_util::errors::GraftError;

use crate::report::MergeReport;

/// Policy knobs for a merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Take the source version whenever the two manifests disagree, even
    /// when the versions cannot be ordered.
    pub force_overwrite: bool,
}

/// Merge `src` into `dest`.
///
/// The merge is atomic: the passes run on a copy of `dest`, which replaces
/// `dest` only if all of them succeed. On error `dest` is left as it was.
pub fn merge(
    dest: &mut Manifest,
    src: &Manifest,
    opts: &MergeOptions,
) -> Result<MergeReport, GraftError> {
    let mut work = dest.clone();
    let mut report = MergeReport::new();

    tracing::info!(dest = %dest.module, src = %src.module, force = opts.force_overwrite, "merging manifests");

    require::merge_requires(&mut work, src, opts.force_overwrite, &mut report)?;
    replace::merge_replacements(&mut work, src, &mut report)?;
    exclude::merge_excludes(&mut work, src, &mut report);

    tracing::info!(
        decisions = report.len(),
        added = report.added(),
        "merge complete"
    );
    *dest = work;
    Ok(report)
}
