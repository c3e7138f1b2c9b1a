//! Structured record of every decision a merge makes.

use std::fmt;

use modgraft_core::coordinate::ModuleCoordinate;
use modgraft_core::manifest::ReplaceDirective;

/// The manifest section a decision applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Require,
    Replace,
    Exclude,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Require => "require",
            Section::Replace => "replace",
            Section::Exclude => "exclude",
        })
    }
}

/// One decision taken while merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The destination's requirement on the source module was removed.
    RequireDropped { module: ModuleCoordinate },
    /// A repeated requirement in the destination was folded into the first.
    RequireDuplicateDropped { module: ModuleCoordinate },
    /// Both manifests require the same path at the same version.
    RequireMatched { module: ModuleCoordinate },
    /// The destination version was replaced by the source version.
    RequireVersionChanged {
        path: String,
        from: String,
        to: String,
        forced: bool,
    },
    /// The destination version was kept over a higher or equal source version.
    RequireVersionKept {
        path: String,
        kept: String,
        offered: String,
    },
    /// An indirect destination requirement became direct.
    RequirePromoted { module: ModuleCoordinate },
    /// A requirement only the source had was added.
    RequireAdded {
        module: ModuleCoordinate,
        indirect: bool,
    },
    /// A destination replacement of the source module was removed.
    ReplaceDropped { directive: ReplaceDirective },
    ReplaceMatched { directive: ReplaceDirective },
    ReplaceAdded { directive: ReplaceDirective },
    ExcludeMatched { module: ModuleCoordinate },
    ExcludeAdded { module: ModuleCoordinate },
}

impl Decision {
    pub fn section(&self) -> Section {
        match self {
            Decision::RequireDropped { .. }
            | Decision::RequireDuplicateDropped { .. }
            | Decision::RequireMatched { .. }
            | Decision::RequireVersionChanged { .. }
            | Decision::RequireVersionKept { .. }
            | Decision::RequirePromoted { .. }
            | Decision::RequireAdded { .. } => Section::Require,
            Decision::ReplaceDropped { .. }
            | Decision::ReplaceMatched { .. }
            | Decision::ReplaceAdded { .. } => Section::Replace,
            Decision::ExcludeMatched { .. } | Decision::ExcludeAdded { .. } => Section::Exclude,
        }
    }

    /// Short verb for status output (`Matched`, `Added`, ...).
    pub fn label(&self) -> &'static str {
        match self {
            Decision::RequireDropped { .. }
            | Decision::RequireDuplicateDropped { .. }
            | Decision::ReplaceDropped { .. } => "Dropped",
            Decision::RequireMatched { .. }
            | Decision::ReplaceMatched { .. }
            | Decision::ExcludeMatched { .. } => "Matched",
            Decision::RequireVersionChanged { forced: true, .. } => "Overwrote",
            Decision::RequireVersionChanged { forced: false, .. } => "Lowered",
            Decision::RequireVersionKept { .. } => "Kept",
            Decision::RequirePromoted { .. } => "Promoted",
            Decision::RequireAdded { .. }
            | Decision::ReplaceAdded { .. }
            | Decision::ExcludeAdded { .. } => "Added",
        }
    }

    /// What the decision was about, without the section or verb.
    pub fn subject(&self) -> String {
        match self {
            Decision::RequireDropped { module }
            | Decision::RequireDuplicateDropped { module }
            | Decision::RequireMatched { module }
            | Decision::RequirePromoted { module }
            | Decision::ExcludeMatched { module }
            | Decision::ExcludeAdded { module } => module.to_string(),
            Decision::RequireVersionChanged { path, from, to, .. } => {
                format!("{path} {from} -> {to}")
            }
            Decision::RequireVersionKept {
                path,
                kept,
                offered,
            } => format!("{path} {kept} (source has {offered})"),
            Decision::RequireAdded { module, indirect } => {
                let kind = if *indirect { "indirect" } else { "direct" };
                format!("{module} ({kind})")
            }
            Decision::ReplaceDropped { directive }
            | Decision::ReplaceMatched { directive }
            | Decision::ReplaceAdded { directive } => directive.to_string(),
        }
    }

    /// Whether the decision added a new entry to the destination.
    pub fn is_addition(&self) -> bool {
        matches!(
            self,
            Decision::RequireAdded { .. }
                | Decision::ReplaceAdded { .. }
                | Decision::ExcludeAdded { .. }
        )
    }

    /// Whether the decision left the destination as it was.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            Decision::RequireMatched { .. }
                | Decision::RequireVersionKept { .. }
                | Decision::ReplaceMatched { .. }
                | Decision::ExcludeMatched { .. }
        )
    }
}

/// Renders as `(require) match: golang.org/x/text@v0.3.0`.
impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Decision::RequireDropped { .. } | Decision::ReplaceDropped { .. } => "drop",
            Decision::RequireDuplicateDropped { .. } => "drop duplicate",
            Decision::RequireMatched { .. }
            | Decision::ReplaceMatched { .. }
            | Decision::ExcludeMatched { .. } => "match",
            Decision::RequireVersionChanged { forced: true, .. } => "overwrite version",
            Decision::RequireVersionChanged { forced: false, .. } => "replace version",
            Decision::RequireVersionKept { .. } => "keep version",
            Decision::RequirePromoted { .. } => "make direct",
            Decision::RequireAdded { .. }
            | Decision::ReplaceAdded { .. }
            | Decision::ExcludeAdded { .. } => "add new",
        };
        write!(f, "({}) {action}: {}", self.section(), self.subject())
    }
}

/// Every decision taken by one merge, in order.
#[derive(Debug, Default)]
pub struct MergeReport {
    pub decisions: Vec<Decision>,
}

impl MergeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, decision: Decision) {
        tracing::debug!("{decision}");
        self.decisions.push(decision);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decision> {
        self.decisions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Number of entries added to the destination.
    pub fn added(&self) -> usize {
        self.decisions.iter().filter(|d| d.is_addition()).count()
    }

    /// Whether the merge changed nothing at all.
    pub fn is_noop(&self) -> bool {
        self.decisions.iter().all(Decision::is_noop)
    }

    pub fn in_section(&self, section: Section) -> impl Iterator<Item = &Decision> {
        self.decisions.iter().filter(move |d| d.section() == section)
    }
}

impl<'a> IntoIterator for &'a MergeReport {
    type Item = &'a Decision;
    type IntoIter = std::slice::Iter<'a, Decision>;

    fn into_iter(self) -> Self::IntoIter {
        self.decisions.iter()
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.decisions {
            writeln!(f, "{d}")?;
        }
        Ok(())
    }
}
