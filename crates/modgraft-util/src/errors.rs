use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all modgraft operations.
///
/// Every variant is fatal: a merge either completes or aborts on the first
/// error without producing output.
#[derive(Debug, Error, Diagnostic)]
pub enum GraftError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required command-line inputs are missing.
    #[error("usage: {message}")]
    #[diagnostic(help("modgraft --dest <FILE> --src <FILE> [--force-overwrite]"))]
    Usage { message: String },

    /// Malformed manifest syntax.
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check the go.mod file for syntax errors"))]
    Manifest { message: String },

    /// A version string that is not a valid semantic version.
    #[error("Invalid version '{version}': {message}")]
    Version { version: String, message: String },

    /// Destination and source disagree on a version in a way that cannot be
    /// ordered (release vs. pre-release or pseudo-version).
    #[error("cannot reconcile difference between versions: dest={dest} src={src}")]
    #[diagnostic(help(
        "Resolve the version by hand in one of the manifests, or pass --force-overwrite to take the source version"
    ))]
    IrreconcilableVersion { dest: String, src: String },

    /// The same original module is redirected to two different targets.
    #[error("conflicting replacements: dest has `{dest}` but src has `{src}`")]
    #[diagnostic(help("Both manifests must agree on the replacement target"))]
    ConflictingReplacement { dest: String, src: String },

    /// Invalid configuration file.
    #[error("Config error: {message}")]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type GraftResult<T> = miette::Result<T>;
