//! Requirement merge.
//!
//! Rules:
//! - The destination's own requirement on the source module is dropped.
//! - Paths only the source requires are added with the source's version and
//!   directness.
//! - When both require a path at different versions, the lower version wins
//!   (or the source version with `force_overwrite`). Releases and
//!   pre-releases cannot be ordered against each other without force.
//! - A requirement indirect in the destination but direct in the source
//!   becomes direct.

use modgraft_core::manifest::{Manifest, RequireEntry};
use modgraft_core::version::ModuleVersion;
use modgraft_util::errors::GraftError;

use crate::report::{Decision, MergeReport};

pub fn merge_requires(
    dest: &mut Manifest,
    src: &Manifest,
    force_overwrite: bool,
    report: &mut MergeReport,
) -> Result<(), GraftError> {
    let self_path = src.module.as_str();
    for entry in dest.drop_require(self_path) {
        report.push(Decision::RequireDropped {
            module: entry.module,
        });
    }
    collapse_duplicates(dest, report);

    for s in &src.require {
        if s.module.path == self_path {
            tracing::warn!(module = %s.module, "source requires itself, skipping");
            continue;
        }

        let Some(idx) = dest
            .require
            .iter()
            .position(|d| d.module.path == s.module.path)
        else {
            dest.add_new_require(&s.module.path, &s.module.version, s.indirect);
            report.push(Decision::RequireAdded {
                module: s.module.clone(),
                indirect: s.indirect,
            });
            continue;
        };

        let d = &mut dest.require[idx];
        if d.module.version == s.module.version {
            report.push(Decision::RequireMatched {
                module: s.module.clone(),
            });
        } else {
            reconcile_version(d, s, force_overwrite, report)?;
        }

        if d.indirect && !s.indirect {
            d.indirect = false;
            report.push(Decision::RequirePromoted {
                module: d.module.clone(),
            });
        }
    }

    Ok(())
}

/// Settle a version disagreement between a destination and source entry
/// for the same path.
fn reconcile_version(
    d: &mut RequireEntry,
    s: &RequireEntry,
    force_overwrite: bool,
    report: &mut MergeReport,
) -> Result<(), GraftError> {
    let dest_version = ModuleVersion::parse(&d.module.version)?;
    let src_version = ModuleVersion::parse(&s.module.version)?;

    if !force_overwrite && !dest_version.comparable(&src_version) {
        tracing::debug!(
            path = %d.module.path,
            dest_pseudo = dest_version.is_pseudo(),
            src_pseudo = src_version.is_pseudo(),
            "versions cannot be ordered"
        );
        return Err(GraftError::IrreconcilableVersion {
            dest: d.module.to_string(),
            src: s.module.to_string(),
        });
    }

    if force_overwrite || src_version.less_than(&dest_version) {
        report.push(Decision::RequireVersionChanged {
            path: d.module.path.clone(),
            from: d.module.version.clone(),
            to: s.module.version.clone(),
            forced: force_overwrite,
        });
        d.module.version = s.module.version.clone();
    } else {
        report.push(Decision::RequireVersionKept {
            path: d.module.path.clone(),
            kept: d.module.version.clone(),
            offered: s.module.version.clone(),
        });
    }
    Ok(())
}

/// Fold repeated destination requirements into the first one for each path
/// so every source entry reconciles against exactly one destination entry.
fn collapse_duplicates(dest: &mut Manifest, report: &mut MergeReport) {
    let mut kept: Vec<RequireEntry> = Vec::with_capacity(dest.require.len());
    for entry in std::mem::take(&mut dest.require) {
        match kept.iter_mut().find(|k| k.module.path == entry.module.path) {
            Some(first) => {
                tracing::warn!(
                    module = %entry.module,
                    kept = %first.module,
                    "duplicate requirement in destination"
                );
                first.indirect &= entry.indirect;
                report.push(Decision::RequireDuplicateDropped {
                    module: entry.module,
                });
            }
            None => kept.push(entry),
        }
    }
    dest.require = kept;
}
