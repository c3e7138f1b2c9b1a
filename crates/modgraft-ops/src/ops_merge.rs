//! Operation: merge a source go.mod into a destination go.mod.

use std::path::{Path, PathBuf};

use modgraft_core::manifest::Manifest;
use modgraft_merge::report::MergeReport;
use modgraft_merge::MergeOptions;
use modgraft_util::errors::{GraftError, GraftResult};

/// Options for `modgraft`.
pub struct MergeFileOptions {
    /// The manifest that absorbs the other one.
    pub dest: PathBuf,
    /// The manifest being absorbed.
    pub src: PathBuf,
    /// Take source versions unconditionally.
    pub force_overwrite: bool,
}

/// The result of a successful merge.
pub struct MergeOutcome {
    pub manifest: Manifest,
    pub report: MergeReport,
    /// Canonical go.mod text of the merged manifest.
    pub output: String,
}

/// Read both manifests, merge the source into the destination, normalize and
/// format the result. Nothing is written; the caller decides where the output
/// goes.
pub fn merge_files(opts: &MergeFileOptions) -> GraftResult<MergeOutcome> {
    let mut dest = load_manifest(&opts.dest)?;
    let src = load_manifest(&opts.src)?;

    if let Some(note) = src.deprecated() {
        tracing::warn!(module = %src.module, "source module is deprecated: {note}");
    }

    let report = modgraft_merge::merge(
        &mut dest,
        &src,
        &MergeOptions {
            force_overwrite: opts.force_overwrite,
        },
    )?;

    dest.normalize();
    let output = dest.format();
    Ok(MergeOutcome {
        manifest: dest,
        report,
        output,
    })
}

/// Read and parse a go.mod file.
pub fn load_manifest(path: &Path) -> Result<Manifest, GraftError> {
    let content = modgraft_util::fs::read_to_string(path)?;
    Manifest::parse(&modgraft_util::fs::display_name(path), &content)
}
