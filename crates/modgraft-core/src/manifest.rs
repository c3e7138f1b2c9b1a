use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::coordinate::ModuleCoordinate;

/// Comments attached to a single line of the manifest.
///
/// Text is stored without the leading `//` and surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comments {
    /// Whole-line comments directly above the entry.
    #[serde(default)]
    pub before: Vec<String>,
    /// Trailing comment on the entry's own line.
    #[serde(default)]
    pub suffix: Option<String>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.suffix.is_none()
    }
}

/// A `require` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequireEntry {
    pub module: ModuleCoordinate,
    /// Only needed transitively (`// indirect`).
    #[serde(default)]
    pub indirect: bool,
    #[serde(default)]
    pub comments: Comments,
}

impl RequireEntry {
    pub fn new(path: impl Into<String>, version: impl Into<String>, indirect: bool) -> Self {
        Self {
            module: ModuleCoordinate::new(path, version),
            indirect,
            comments: Comments::default(),
        }
    }
}

/// A `replace old [v] => new [v]` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceDirective {
    pub old: ModuleCoordinate,
    pub new: ModuleCoordinate,
    #[serde(default)]
    pub comments: Comments,
}

impl ReplaceDirective {
    pub fn new(old: ModuleCoordinate, new: ModuleCoordinate) -> Self {
        Self {
            old,
            new,
            comments: Comments::default(),
        }
    }
}

impl std::fmt::Display for ReplaceDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} => {}", self.old, self.new)
    }
}

/// An `exclude path version` directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeDirective {
    pub module: ModuleCoordinate,
    #[serde(default)]
    pub comments: Comments,
}

impl ExcludeDirective {
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            module: ModuleCoordinate::new(path, version),
            comments: Comments::default(),
        }
    }
}

/// A `retract` directive: a single version (`low == high`) or an interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetractDirective {
    pub low: String,
    pub high: String,
    #[serde(default)]
    pub comments: Comments,
}

/// A `godebug key=value` setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GodebugSetting {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub comments: Comments,
}

/// A directive naming a single path, such as `tool` or `ignore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathDirective {
    pub path: String,
    #[serde(default)]
    pub comments: Comments,
}

impl PathDirective {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            comments: Comments::default(),
        }
    }
}

/// The structured form of a `go.mod` file.
///
/// Only `require`, `replace` and `exclude` take part in a merge. The other
/// directives are carried so the destination round-trips through
/// [`Manifest::format`] without losing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// The module's own path (its identity).
    pub module: String,
    #[serde(default)]
    pub module_comments: Comments,
    #[serde(default)]
    pub go: Option<String>,
    #[serde(default)]
    pub go_comments: Comments,
    #[serde(default)]
    pub toolchain: Option<String>,
    #[serde(default)]
    pub toolchain_comments: Comments,
    #[serde(default)]
    pub godebug: Vec<GodebugSetting>,
    #[serde(default)]
    pub require: Vec<RequireEntry>,
    #[serde(default)]
    pub replace: Vec<ReplaceDirective>,
    #[serde(default)]
    pub exclude: Vec<ExcludeDirective>,
    #[serde(default)]
    pub retract: Vec<RetractDirective>,
    #[serde(default)]
    pub tool: Vec<PathDirective>,
    /// Directories the go command skips (`ignore`).
    #[serde(default)]
    pub ignore: Vec<PathDirective>,
    /// Comments after the last directive.
    #[serde(default)]
    pub trailing_comments: Vec<String>,
}

impl Manifest {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }

    /// Parse `go.mod` text; `file` names the source in error messages.
    pub fn parse(file: &str, content: &str) -> Result<Self, modgraft_util::errors::GraftError> {
        crate::modfile::parse(file, content)
    }

    /// The module's deprecation notice, if its comments carry one.
    pub fn deprecated(&self) -> Option<&str> {
        self.module_comments
            .before
            .iter()
            .chain(self.module_comments.suffix.iter())
            .find_map(|c| c.strip_prefix("Deprecated:"))
            .map(str::trim)
    }

    pub fn find_require(&self, path: &str) -> Option<&RequireEntry> {
        self.require.iter().find(|r| r.module.path == path)
    }

    /// Create the requirement if `path` is absent, otherwise update the first
    /// entry with that path in place.
    pub fn add_or_update_require(&mut self, path: &str, version: &str, indirect: bool) {
        match self.require.iter_mut().find(|r| r.module.path == path) {
            Some(entry) => {
                entry.module.version = version.to_string();
                entry.indirect = indirect;
            }
            None => self.require.push(RequireEntry::new(path, version, indirect)),
        }
    }

    /// Append a requirement only if no entry has `path`. Returns whether it
    /// was inserted.
    pub fn add_new_require(&mut self, path: &str, version: &str, indirect: bool) -> bool {
        if self.find_require(path).is_some() {
            return false;
        }
        self.require.push(RequireEntry::new(path, version, indirect));
        true
    }

    /// Remove every requirement on `path`, returning what was removed.
    pub fn drop_require(&mut self, path: &str) -> Vec<RequireEntry> {
        let (dropped, kept) = std::mem::take(&mut self.require)
            .into_iter()
            .partition(|r| r.module.path == path);
        self.require = kept;
        dropped
    }

    pub fn find_replace(&self, old: &ModuleCoordinate) -> Option<&ReplaceDirective> {
        self.replace.iter().find(|r| &r.old == old)
    }

    /// Append a replacement unless one already exists for `old`. Returns
    /// whether it was inserted.
    pub fn add_replace(&mut self, old: ModuleCoordinate, new: ModuleCoordinate) -> bool {
        if self.find_replace(&old).is_some() {
            return false;
        }
        self.replace.push(ReplaceDirective::new(old, new));
        true
    }

    /// Remove the replacement for exactly `old`. Returns whether one existed.
    pub fn drop_replace(&mut self, old: &ModuleCoordinate) -> bool {
        let before = self.replace.len();
        self.replace.retain(|r| &r.old != old);
        self.replace.len() != before
    }

    pub fn has_exclude(&self, module: &ModuleCoordinate) -> bool {
        self.exclude.iter().any(|e| &e.module == module)
    }

    /// Append an exclusion unless it is already present. Returns whether it
    /// was inserted.
    pub fn add_exclude(&mut self, path: &str, version: &str) -> bool {
        if self.has_exclude(&ModuleCoordinate::new(path, version)) {
            return false;
        }
        self.exclude.push(ExcludeDirective::new(path, version));
        true
    }

    /// Clean up the representation before formatting.
    ///
    /// Trims every field, collapses requirements sharing a path into the
    /// first one (direct if any duplicate was direct), and drops repeated
    /// replacements and exclusions. Order is otherwise preserved.
    pub fn normalize(&mut self) {
        self.module = self.module.trim().to_string();
        if let Some(go) = self.go.as_mut() {
            *go = go.trim().to_string();
        }
        if let Some(toolchain) = self.toolchain.as_mut() {
            *toolchain = toolchain.trim().to_string();
        }

        let mut require: Vec<RequireEntry> = Vec::with_capacity(self.require.len());
        for mut entry in std::mem::take(&mut self.require) {
            trim_coordinate(&mut entry.module);
            match require
                .iter_mut()
                .find(|r| r.module.path == entry.module.path)
            {
                Some(first) => first.indirect &= entry.indirect,
                None => require.push(entry),
            }
        }
        self.require = require;

        let mut replace: Vec<ReplaceDirective> = Vec::with_capacity(self.replace.len());
        for mut directive in std::mem::take(&mut self.replace) {
            trim_coordinate(&mut directive.old);
            trim_coordinate(&mut directive.new);
            if !replace
                .iter()
                .any(|r| r.old == directive.old && r.new == directive.new)
            {
                replace.push(directive);
            }
        }
        self.replace = replace;

        let mut exclude: Vec<ExcludeDirective> = Vec::with_capacity(self.exclude.len());
        for mut directive in std::mem::take(&mut self.exclude) {
            trim_coordinate(&mut directive.module);
            if !exclude.iter().any(|e| e.module == directive.module) {
                exclude.push(directive);
            }
        }
        self.exclude = exclude;

        for directive in self.tool.iter_mut().chain(self.ignore.iter_mut()) {
            directive.path = directive.path.trim().to_string();
        }
    }

    /// Serialize to canonical `go.mod` text.
    pub fn format(&self) -> String {
        let mut out = String::new();

        write_comments(&mut out, &self.module_comments.before, "");
        out.push_str("module ");
        out.push_str(&quote(&self.module));
        write_suffix(&mut out, self.module_comments.suffix.as_deref());

        if let Some(go) = &self.go {
            write_single(&mut out, "go", go, &self.go_comments);
        }
        if let Some(toolchain) = &self.toolchain {
            write_single(&mut out, "toolchain", toolchain, &self.toolchain_comments);
        }

        write_section(&mut out, "godebug", &self.godebug, |g| {
            (
                format!("{}={}", g.key, g.value),
                g.comments.suffix.clone(),
                &g.comments.before,
            )
        });
        write_section(&mut out, "require", &self.require, |r| {
            let suffix = match (r.indirect, r.comments.suffix.as_deref()) {
                (true, Some(text)) => Some(format!("indirect; {text}")),
                (true, None) => Some("indirect".to_string()),
                (false, text) => text.map(str::to_string),
            };
            (
                format!("{} {}", quote(&r.module.path), quote(&r.module.version)),
                suffix,
                &r.comments.before,
            )
        });
        write_section(&mut out, "replace", &self.replace, |r| {
            (
                format!("{} => {}", coordinate_tokens(&r.old), coordinate_tokens(&r.new)),
                r.comments.suffix.clone(),
                &r.comments.before,
            )
        });
        write_section(&mut out, "exclude", &self.exclude, |e| {
            (
                format!("{} {}", quote(&e.module.path), quote(&e.module.version)),
                e.comments.suffix.clone(),
                &e.comments.before,
            )
        });
        write_section(&mut out, "retract", &self.retract, |r| {
            let text = if r.low == r.high {
                quote(&r.low)
            } else {
                format!("[{}, {}]", quote(&r.low), quote(&r.high))
            };
            (text, r.comments.suffix.clone(), &r.comments.before)
        });
        for (verb, items) in [("tool", &self.tool), ("ignore", &self.ignore)] {
            write_section(&mut out, verb, items, |p| {
                (quote(&p.path), p.comments.suffix.clone(), &p.comments.before)
            });
        }

        if !self.trailing_comments.is_empty() {
            out.push('\n');
            write_comments(&mut out, &self.trailing_comments, "");
        }
        out
    }

    /// Serialize to bytes, ready to be written out.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.format().into_bytes()
    }
}

fn trim_coordinate(coord: &mut ModuleCoordinate) {
    coord.path = coord.path.trim().to_string();
    coord.version = coord.version.trim().to_string();
}

fn coordinate_tokens(coord: &ModuleCoordinate) -> String {
    if coord.version.is_empty() {
        quote(&coord.path)
    } else {
        format!("{} {}", quote(&coord.path), quote(&coord.version))
    }
}

fn write_single(out: &mut String, verb: &str, value: &str, comments: &Comments) {
    out.push('\n');
    write_comments(out, &comments.before, "");
    let _ = write!(out, "{verb} {}", quote(value));
    write_suffix(out, comments.suffix.as_deref());
}

/// Write one section: a single line for one entry, a block for several.
fn write_section<'a, T, F>(out: &mut String, verb: &str, items: &'a [T], render: F)
where
    F: Fn(&'a T) -> (String, Option<String>, &'a Vec<String>),
{
    match items {
        [] => {}
        [item] => {
            let (line, suffix, before) = render(item);
            out.push('\n');
            write_comments(out, before, "");
            let _ = write!(out, "{verb} {line}");
            write_suffix(out, suffix.as_deref());
        }
        _ => {
            let _ = write!(out, "\n{verb} (\n");
            for item in items {
                let (line, suffix, before) = render(item);
                write_comments(out, before, "\t");
                out.push('\t');
                out.push_str(&line);
                write_suffix(out, suffix.as_deref());
            }
            out.push_str(")\n");
        }
    }
}

fn write_comments(out: &mut String, comments: &[String], indent: &str) {
    for c in comments {
        if c.is_empty() {
            let _ = writeln!(out, "{indent}//");
        } else {
            let _ = writeln!(out, "{indent}// {c}");
        }
    }
}

fn write_suffix(out: &mut String, suffix: Option<&str>) {
    if let Some(text) = suffix {
        out.push_str(" // ");
        out.push_str(text);
    }
    out.push('\n');
}

/// Whether a token must be written as a quoted string to lex back the same.
pub fn must_quote(s: &str) -> bool {
    let special = s.chars().any(|c| match c {
        ' ' | '"' | '\'' | '`' => true,
        '(' | ')' | '[' | ']' | '{' | '}' | ',' => s.len() > 1,
        c => c.is_control() || c.is_whitespace(),
    });
    special || s.is_empty() || s.contains("//") || s.contains("/*") || s.contains("=>")
}

/// Quote `s` if needed, escaping backslashes, quotes and control characters.
pub fn quote(s: &str) -> String {
    if !must_quote(s) {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_plain_path_untouched() {
        assert_eq!(quote("golang.org/x/text"), "golang.org/x/text");
        assert_eq!(quote("../local/dir"), "../local/dir");
    }

    #[test]
    fn quote_spaces_and_comment_markers() {
        assert_eq!(quote("my dir/pkg"), "\"my dir/pkg\"");
        assert_eq!(quote("a//b"), "\"a//b\"");
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn suffix_renders_indirect_with_extra_text() {
        let mut manifest = Manifest::new("example.com/app");
        let mut entry = RequireEntry::new("example.com/dep", "v1.0.0", true);
        entry.comments.suffix = Some("pinned".to_string());
        manifest.require.push(entry);

        let text = manifest.format();
        assert!(text.contains("require example.com/dep v1.0.0 // indirect; pinned\n"));
    }
}
