use modgraft_core::coordinate::ModuleCoordinate;
use modgraft_core::manifest::Manifest;

const MINIMAL_MOD: &str = "module example.com/app\n";

const FULL_MOD: &str = r#"// Deprecated: use example.com/app/v2 instead.
module example.com/app

go 1.21

toolchain go1.21.4

godebug default=go1.21

require (
	github.com/pkg/errors v0.9.1
	// text handling
	golang.org/x/text v0.3.0 // indirect
	gopkg.in/yaml.v3 v3.0.1 // indirect; pulled in by tests
)

replace (
	github.com/pkg/errors => ../errors
	golang.org/x/net v0.1.0 => golang.org/x/net v0.2.0
)

exclude golang.org/x/crypto v0.0.1

retract (
	v1.0.0 // published by mistake
	[v1.1.0, v1.1.5]
)
"#;

#[test]
fn test_parse_minimal_manifest() {
    let manifest = Manifest::parse("go.mod", MINIMAL_MOD).unwrap();
    assert_eq!(manifest.module, "example.com/app");
    assert!(manifest.go.is_none());
    assert!(manifest.require.is_empty());
    assert!(manifest.replace.is_empty());
    assert!(manifest.exclude.is_empty());
}

#[test]
fn test_parse_full_manifest() {
    let manifest = Manifest::parse("go.mod", FULL_MOD).unwrap();
    assert_eq!(manifest.module, "example.com/app");
    assert_eq!(manifest.go.as_deref(), Some("1.21"));
    assert_eq!(manifest.toolchain.as_deref(), Some("go1.21.4"));
    assert_eq!(manifest.godebug.len(), 1);
    assert_eq!(manifest.godebug[0].key, "default");
    assert_eq!(manifest.godebug[0].value, "go1.21");

    assert_eq!(manifest.require.len(), 3);
    assert!(!manifest.require[0].indirect);
    assert!(manifest.require[1].indirect);
    assert_eq!(manifest.require[1].comments.before, vec!["text handling"]);
    assert!(manifest.require[2].indirect);
    assert_eq!(
        manifest.require[2].comments.suffix.as_deref(),
        Some("pulled in by tests")
    );

    assert_eq!(manifest.replace.len(), 2);
    assert_eq!(
        manifest.replace[0].old,
        ModuleCoordinate::unversioned("github.com/pkg/errors")
    );
    assert_eq!(manifest.replace[0].new, ModuleCoordinate::unversioned("../errors"));
    assert_eq!(
        manifest.replace[1].new,
        ModuleCoordinate::new("golang.org/x/net", "v0.2.0")
    );

    assert_eq!(manifest.exclude.len(), 1);
    assert_eq!(manifest.exclude[0].module.version, "v0.0.1");

    assert_eq!(manifest.retract.len(), 2);
    assert_eq!(manifest.retract[0].low, "v1.0.0");
    assert_eq!(manifest.retract[0].high, "v1.0.0");
    assert_eq!(manifest.retract[1].low, "v1.1.0");
    assert_eq!(manifest.retract[1].high, "v1.1.5");
}

#[test]
fn test_parse_deprecation_notice() {
    let manifest = Manifest::parse("go.mod", FULL_MOD).unwrap();
    assert_eq!(
        manifest.deprecated(),
        Some("use example.com/app/v2 instead.")
    );
    let plain = Manifest::parse("go.mod", MINIMAL_MOD).unwrap();
    assert!(plain.deprecated().is_none());
}

#[test]
fn test_parse_single_line_directives() {
    let content = "module example.com/app\n\nrequire example.com/dep v1.0.0 // indirect\nreplace example.com/dep v1.0.0 => example.com/fork v1.0.1\n";
    let manifest = Manifest::parse("go.mod", content).unwrap();
    assert_eq!(manifest.require.len(), 1);
    assert!(manifest.require[0].indirect);
    assert_eq!(manifest.replace[0].old.version, "v1.0.0");
    assert_eq!(manifest.replace[0].new.path, "example.com/fork");
}

#[test]
fn test_parse_quoted_module_path() {
    let manifest = Manifest::parse("go.mod", "module \"example.com/my app\"\n").unwrap();
    assert_eq!(manifest.module, "example.com/my app");
}

#[test]
fn test_missing_module_is_error() {
    let err = Manifest::parse("go.mod", "go 1.21\n").unwrap_err();
    assert!(err.to_string().contains("no module directive"), "got: {err}");
}

#[test]
fn test_unknown_directive_reports_line() {
    let err = Manifest::parse("deps/go.mod", "module a\n\nrequir b v1.0.0\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("deps/go.mod:3"), "got: {msg}");
    assert!(msg.contains("unknown directive: requir"), "got: {msg}");
}

#[test]
fn test_unterminated_block_is_error() {
    let err = Manifest::parse("go.mod", "module a\nrequire (\n\tb v1.0.0\n").unwrap_err();
    assert!(err.to_string().contains("unterminated require block"));
}

#[test]
fn test_require_wrong_arity_is_error() {
    assert!(Manifest::parse("go.mod", "module a\nrequire b\n").is_err());
    assert!(Manifest::parse("go.mod", "module a\nrequire b v1 v2\n").is_err());
}

#[test]
fn test_replace_without_arrow_is_error() {
    let err = Manifest::parse("go.mod", "module a\nreplace b v1.0.0 c v1.0.0\n").unwrap_err();
    assert!(err.to_string().contains("usage: replace"));
}

#[test]
fn test_repeated_module_is_error() {
    assert!(Manifest::parse("go.mod", "module a\nmodule b\n").is_err());
}

#[test]
fn test_module_block_not_allowed() {
    assert!(Manifest::parse("go.mod", "module (\n\ta\n)\n").is_err());
}

#[test]
fn test_duplicate_requires_are_tolerated() {
    let content = "module a\nrequire (\n\tb v1.0.0\n\tb v1.1.0\n)\n";
    let manifest = Manifest::parse("go.mod", content).unwrap();
    assert_eq!(manifest.require.len(), 2);
}

#[test]
fn test_go_and_toolchain_comments_survive_format() {
    let content = "module example.com/app\n\n// minimum go\ngo 1.21 // keep in sync with CI\n\n// pinned toolchain\ntoolchain go1.21.4\n";
    let manifest = Manifest::parse("go.mod", content).unwrap();

    assert_eq!(manifest.go_comments.before, vec!["minimum go"]);
    assert_eq!(
        manifest.go_comments.suffix.as_deref(),
        Some("keep in sync with CI")
    );
    assert_eq!(manifest.toolchain_comments.before, vec!["pinned toolchain"]);
    assert_eq!(manifest.format(), content);
}

#[test]
fn test_parse_tool_and_ignore_directives() {
    let content = "module example.com/app\n\ngo 1.24\n\ntool (\n\tgolang.org/x/tools/cmd/stringer\n\t// codegen\n\texample.com/app/cmd/gen\n)\n\nignore ./node_modules // frontend\n";
    let manifest = Manifest::parse("go.mod", content).unwrap();

    let tools: Vec<&str> = manifest.tool.iter().map(|t| t.path.as_str()).collect();
    assert_eq!(
        tools,
        vec!["golang.org/x/tools/cmd/stringer", "example.com/app/cmd/gen"]
    );
    assert_eq!(manifest.tool[1].comments.before, vec!["codegen"]);
    assert_eq!(manifest.ignore.len(), 1);
    assert_eq!(manifest.ignore[0].path, "./node_modules");
    assert_eq!(manifest.format(), content);
}

#[test]
fn test_tool_wrong_arity_is_error() {
    let err = Manifest::parse("go.mod", "module example.com/app\ntool a b\n").unwrap_err();
    assert!(err.to_string().contains("go.mod:2"), "got: {err}");
}
