use serde::{Deserialize, Serialize};
use std::path::Path;

use modgraft_util::errors::GraftError;

/// Optional configuration loaded from a TOML file passed with `--config`.
///
/// Command-line flags and environment variables take precedence over
/// anything set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraftConfig {
    #[serde(default)]
    pub merge: MergeConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Merge policy from `[merge]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Take the source version unconditionally when versions differ.
    #[serde(default, rename = "force-overwrite")]
    pub force_overwrite: bool,
}

/// Decision output settings from `[diagnostics]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Suppress the per-decision lines on stderr.
    #[serde(default)]
    pub quiet: bool,
}

impl GraftConfig {
    pub fn parse_toml(content: &str) -> Result<Self, GraftError> {
        toml::from_str(content).map_err(|e| GraftError::Config {
            message: format!("Failed to parse config: {e}"),
        })
    }

    /// Load a config file.
    pub fn from_path(path: &Path) -> Result<Self, GraftError> {
        let content = modgraft_util::fs::read_to_string(path)?;
        Self::parse_toml(&content).map_err(|e| GraftError::Config {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Load `path` if given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, GraftError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::default()),
        }
    }
}
