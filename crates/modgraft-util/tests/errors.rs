use std::path::PathBuf;

use modgraft_util::errors::GraftError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = GraftError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_read_file_error_names_path() {
    let err = GraftError::ReadFile {
        path: PathBuf::from("deps/go.mod"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    };
    let msg = err.to_string();
    assert!(msg.contains("deps/go.mod"), "got: {msg}");
    assert!(msg.contains("missing"), "got: {msg}");
}

#[test]
fn test_usage_error_display() {
    let err = GraftError::Usage {
        message: "--dest is required".to_string(),
    };
    assert_eq!(err.to_string(), "usage: --dest is required");
}

#[test]
fn test_manifest_error_display() {
    let err = GraftError::Manifest {
        message: "go.mod:3: unknown directive: requir".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Manifest error: go.mod:3: unknown directive: requir"
    );
}

#[test]
fn test_version_error_display() {
    let err = GraftError::Version {
        version: "vX".to_string(),
        message: "unexpected character".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid version 'vX': unexpected character");
}

#[test]
fn test_irreconcilable_version_names_both_coordinates() {
    let err = GraftError::IrreconcilableVersion {
        dest: "example.com/pkg@v1.2.0".to_string(),
        src: "example.com/pkg@v0.0.0-20190101000000-abcdef000000".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("dest=example.com/pkg@v1.2.0"));
    assert!(msg.contains("src=example.com/pkg@v0.0.0-20190101000000-abcdef000000"));
}

#[test]
fn test_conflicting_replacement_display() {
    let err = GraftError::ConflictingReplacement {
        dest: "pkg v1 => local/pkg v1-fork".to_string(),
        src: "pkg v1 => local/pkg v2-fork".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("v1-fork"));
    assert!(msg.contains("v2-fork"));
}

#[test]
fn test_generic_error_display() {
    let err = GraftError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: GraftError = io_err.into();
    assert!(matches!(err, GraftError::Io(_)));
}
