//! Module version parsing and comparison.
//!
//! Go module versions are semantic versions with a leading `v`
//! (`v1.4.2`, `v2.0.0+incompatible`). Pseudo-versions encode a commit
//! timestamp and hash in the pre-release field
//! (`v0.0.0-20190101000000-abcdef000000`). Parsing is lenient in the same
//! places common semver tooling is: the `v` is optional and missing minor or
//! patch components are taken as zero.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use modgraft_util::errors::GraftError;
use semver::Version;

/// A parsed module version backed by semver.
///
/// Ordering follows semver precedence: build metadata is ignored and a
/// pre-release sorts before its release.
#[derive(Debug, Clone)]
pub struct ModuleVersion {
    original: String,
    version: Version,
}

impl ModuleVersion {
    pub fn parse(s: &str) -> Result<Self, GraftError> {
        let coerced = coerce(s)?;
        let version = Version::parse(&coerced).map_err(|e| GraftError::Version {
            version: s.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            original: s.to_string(),
            version,
        })
    }

    /// The version exactly as written in the manifest.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    /// The pre-release tag, empty for plain releases.
    pub fn prerelease(&self) -> &str {
        self.version.pre.as_str()
    }

    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }

    /// Whether this is a commit-derived pseudo-version.
    ///
    /// The pre-release field ends in `<14-digit timestamp>-<12 hex hash>`,
    /// optionally preceded by `0.` or `<pre>.0.`.
    pub fn is_pseudo(&self) -> bool {
        let pre = self.version.pre.as_str();
        let Some((stamp, hash)) = pre.rsplit_once('-') else {
            return false;
        };
        let timestamp = stamp.rsplit('.').next().unwrap_or(stamp);
        hash.len() == 12
            && hash.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
            && timestamp.len() == 14
            && timestamp.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn less_than(&self, other: &Self) -> bool {
        self < other
    }

    /// Whether the two versions may be ordered against each other.
    pub fn comparable(&self, other: &Self) -> bool {
        comparable(self, other)
    }
}

/// Two versions are comparable when both are plain releases or both carry a
/// pre-release tag. A tagged release and a pseudo-version are never ordered
/// automatically.
pub fn comparable(a: &ModuleVersion, b: &ModuleVersion) -> bool {
    a.is_prerelease() == b.is_prerelease()
}

fn coerce(s: &str) -> Result<String, GraftError> {
    let invalid = |message: &str| GraftError::Version {
        version: s.to_string(),
        message: message.to_string(),
    };

    let trimmed = s.trim();
    let body = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    if body.is_empty() {
        return Err(invalid("empty version"));
    }

    let split = body.find(['-', '+']).unwrap_or(body.len());
    let (core, rest) = body.split_at(split);
    let parts: Vec<&str> = core.split('.').collect();
    if parts.len() > 3 {
        return Err(invalid("too many version components"));
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid("version components must be numeric"));
    }

    let mut numbers = parts;
    numbers.resize(3, "0");
    Ok(format!("{}{rest}", numbers.join(".")))
}

impl PartialEq for ModuleVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ModuleVersion {}

impl Ord for ModuleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = &self.version;
        let b = &other.version;
        (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
    }
}

impl PartialOrd for ModuleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for ModuleVersion {
    type Err = GraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
