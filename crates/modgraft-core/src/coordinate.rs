use serde::{Deserialize, Serialize};

/// A module import path plus a version string.
///
/// Equality is exact string equality on both fields; `v1.2` and `v1.2.0` are
/// different coordinates. The version may be empty, e.g. for the target of a
/// replacement that points at a local directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleCoordinate {
    pub path: String,
    #[serde(default)]
    pub version: String,
}

impl ModuleCoordinate {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }

    /// A coordinate with no version (matches every version, or names a local path).
    pub fn unversioned(path: impl Into<String>) -> Self {
        Self::new(path, "")
    }

    pub fn has_version(&self) -> bool {
        !self.version.is_empty()
    }
}

/// Renders as `path@version`, or just `path` when the version is empty.
impl std::fmt::Display for ModuleCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.version.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}@{}", self.path, self.version)
        }
    }
}
