//! Integration tests for project scanning

use callmap_core::walk::{self, is_ignored, is_source_file_name};
use callmap_core::{scan_project, CallableKind, MethodRole, ScanError, ScanOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The fixture tree lives under `tests/`, which the default ignore set matches
fn fixture_options() -> ScanOptions {
    ScanOptions {
        ignored: vec!["node_modules".to_string()],
        jobs: 1,
    }
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn summary(root: &Path, options: &ScanOptions) -> Vec<(String, String, u32, CallableKind)> {
    let report = scan_project(root, options).unwrap();
    report
        .records
        .into_iter()
        .map(|r| {
            let relative = Path::new(&r.file)
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            (relative, r.name, r.line, r.kind)
        })
        .collect()
}

#[test]
fn test_scan_fixture_project() {
    use CallableKind::*;

    let root = fixture_path("project");
    let records = summary(&root, &fixture_options());
    let expected: Vec<(&str, &str, u32, CallableKind)> = vec![
        ("app.js", "main", 3, FunctionDeclaration),
        ("app.js", "run", 4, ArrowFunction),
        ("app.js", "constructor", 9, ClassMethod(MethodRole::Constructor)),
        ("app.js", "address", 13, ClassMethod(MethodRole::Getter)),
        ("app.js", "address", 17, ClassMethod(MethodRole::Setter)),
        ("app.js", "create", 21, ClassMethod(MethodRole::Method)),
        ("app.js", "start", 26, FunctionExpression),
        ("app.js", "<anonymous>", 30, FunctionDeclaration),
        ("legacy/addon.jsm", "shutdown", 7, FunctionDeclaration),
        ("lib/util.mjs", "helper", 1, ArrowFunction),
        ("lib/util.mjs", "format", 3, FunctionDeclaration),
        ("lib/util.mjs", "pad", 4, FunctionDeclaration),
    ];
    let expected: Vec<_> = expected
        .into_iter()
        .map(|(f, n, l, k)| (f.to_string(), n.to_string(), l, k))
        .collect();
    assert_eq!(records, expected);
}

#[test]
fn test_parse_failure_does_not_stop_scan() {
    let root = fixture_path("project");
    let report = scan_project(&root, &fixture_options()).unwrap();

    assert_eq!(report.parse_failures.len(), 1);
    assert!(report.parse_failures[0].file.ends_with("broken.js"));
    assert!(report.records.iter().all(|r| !r.file.ends_with("broken.js")));
    assert!(report.records.iter().any(|r| r.file.ends_with("util.mjs")));
}

#[test]
fn test_default_ignores_match_fixture_location() {
    // Substring matching over the full path: ".../tests/fixtures/..." contains "tests"
    let report = scan_project(&fixture_path("project"), &ScanOptions::default()).unwrap();
    assert!(report.records.is_empty());
    assert!(report.parse_failures.is_empty());
}

#[test]
fn test_scan_is_idempotent() {
    let root = fixture_path("project");
    let first = scan_project(&root, &fixture_options()).unwrap();
    let second = scan_project(&root, &fixture_options()).unwrap();
    assert_eq!(first.records, second.records);
    assert_eq!(first.parse_failures, second.parse_failures);
}

#[test]
fn test_parallel_scan_preserves_discovery_order() {
    let root = fixture_path("project");
    let sequential = scan_project(&root, &fixture_options()).unwrap();
    for jobs in [0, 2, 4] {
        let options = ScanOptions {
            jobs,
            ..fixture_options()
        };
        let parallel = scan_project(&root, &options).unwrap();
        assert_eq!(parallel.records, sequential.records, "jobs = {jobs}");
    }
}

#[test]
fn test_walker_agrees_with_walkdir() {
    let root = fixture_path("project");
    let ignored = fixture_options().ignored;

    let mut expected: Vec<PathBuf> = walkdir::WalkDir::new(&root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored(e.path(), &ignored))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_str().is_some_and(is_source_file_name))
        .map(|e| e.into_path())
        .collect();
    expected.sort();

    let mut actual = walk::walk(&root, &ignored).unwrap();
    actual.sort();
    assert_eq!(actual, expected);
}

#[test]
fn test_single_function_file() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.js", "function foo() {}");

    let report = scan_project(tmp.path(), &ScanOptions::default()).unwrap();
    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.name, "foo");
    assert!(record.file.ends_with("a.js"));
    assert_eq!(record.file, tmp.path().join("a.js").to_string_lossy());
    assert_eq!(record.line, 1);
    assert_eq!(record.kind, CallableKind::FunctionDeclaration);
}

#[test]
fn test_contests_directory_is_skipped_by_tests_rule() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "contests/release.js", "function release() {}");
    write(tmp.path(), "latest/nightly.js", "function nightly() {}");
    write(tmp.path(), "src/main.js", "function main() {}");

    let report = scan_project(tmp.path(), &ScanOptions::default()).unwrap();
    let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["nightly", "main"]);
}

#[test]
fn test_missing_root_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let err = scan_project(&tmp.path().join("missing"), &ScanOptions::default()).unwrap_err();
    assert!(matches!(err, ScanError::DirectoryAccess { .. }));
}

#[cfg(unix)]
#[test]
fn test_symlink_only_subtree_is_empty() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("root");
    write(tmp.path(), "outside/real.js", "function real() {}");
    fs::create_dir_all(root.join("links")).unwrap();
    std::os::unix::fs::symlink(tmp.path().join("outside/real.js"), root.join("links/real.js"))
        .unwrap();

    let report = scan_project(&root, &ScanOptions::default()).unwrap();
    assert!(report.records.is_empty());
}
