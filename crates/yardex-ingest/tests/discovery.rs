//! Tests for rule file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use yardex_ingest::{DEFAULT_EXTENSIONS, IngestError, list_rule_files, resolve_inputs};

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&path, "rule x { condition: true }\n").expect("write file");
    path
}

fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn lists_rule_files_sorted() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    touch(root, "b.yar");
    touch(root, "a.YARA");
    touch(root, "notes.txt");
    touch(root, "nested/c.yar");

    let files = list_rule_files(root, false, DEFAULT_EXTENSIONS).expect("list");
    assert_eq!(names(root, &files), ["a.YARA", "b.yar"]);

    let files = list_rule_files(root, true, DEFAULT_EXTENSIONS).expect("list recursive");
    assert_eq!(names(root, &files), ["a.YARA", "b.yar", "nested/c.yar"]);
}

#[test]
fn custom_extensions() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    touch(root, "a.rule");
    touch(root, "b.yar");

    let files = list_rule_files(root, false, &["rule".to_string()]).expect("list");
    assert_eq!(names(root, &files), ["a.rule"]);
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope");
    assert!(matches!(
        list_rule_files(&missing, true, DEFAULT_EXTENSIONS),
        Err(IngestError::DirectoryNotFound { .. })
    ));
    assert!(matches!(
        resolve_inputs(&missing, true, DEFAULT_EXTENSIONS),
        Err(IngestError::FileNotFound { .. })
    ));
}

#[test]
fn single_file_is_accepted_regardless_of_extension() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = touch(dir.path(), "rules.txt");
    let files = resolve_inputs(&path, false, DEFAULT_EXTENSIONS).expect("resolve");
    assert_eq!(files, [path]);
}

#[test]
fn recursive_listing_descends_every_level() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    touch(root, "top.yar");
    touch(root, "a/b/c/deep.yara");
    touch(root, "a/b/skip.txt");
    touch(root, "a/mid.yar");
    fs::create_dir_all(root.join("empty/dir")).expect("create empty dir");

    let files = list_rule_files(root, true, DEFAULT_EXTENSIONS).expect("list recursive");
    assert_eq!(names(root, &files), ["a/b/c/deep.yara", "a/mid.yar", "top.yar"]);

    let files = list_rule_files(root, false, DEFAULT_EXTENSIONS).expect("list");
    assert_eq!(names(root, &files), ["top.yar"]);
}
