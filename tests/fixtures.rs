//! End-to-end parsing of real-world manifest files.

use std::path::PathBuf;

use kvtree::{lint_tree, load_tree, parse_str, Config, KvError, ParseErrorKind, TableOptions};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_appmanifest() {
    let tree = load_tree(&fixture("appmanifest_228980.acf"), &Config::default()).unwrap();
    let root = tree.root().unwrap();

    assert_eq!(tree.len(), 8);
    assert_eq!(root.name(), "AppState");
    assert_eq!(root.attributes().len(), 16);
    assert_eq!(root.attribute("installdir"), Some("Steamworks Shared"));

    let children: Vec<&str> = root.children().map(|c| c.name()).collect();
    assert_eq!(
        children,
        vec!["InstalledDepots", "InstallScripts", "UserConfig", "MountedConfig"]
    );

    let scripts = root.child("InstallScripts").unwrap();
    assert_eq!(
        scripts.attribute("228986"),
        Some(r"_CommonRedist\\vcredist\\2013\\installscript.vdf")
    );

    assert!(lint_tree(&tree).is_ok());
}

#[test]
fn test_libraryfolders() {
    let tree = load_tree(&fixture("libraryfolders.vdf"), &Config::default()).unwrap();
    let root = tree.root().unwrap();

    assert_eq!(tree.len(), 5);
    let first = root.child("0").unwrap();
    assert_eq!(first.attribute("path"), Some(r"C:\\Program Files (x86)\\Steam"));
    assert_eq!(first.attribute("label"), Some(""));
    assert_eq!(first.child("apps").unwrap().attributes().len(), 2);

    let second = root.child("1").unwrap();
    assert_eq!(second.attribute("label"), Some("games"));
    assert_eq!(second.child("apps").unwrap().attribute("730"), Some("34567000321"));
}

#[test]
fn test_unbalanced_fixture() {
    let err = load_tree(&fixture("unbalanced.vdf"), &Config::default()).unwrap_err();
    match err {
        KvError::Parse { source, .. } => {
            assert_eq!(source.kind(), ParseErrorKind::UnmatchedBraces);
            assert_eq!(source.to_string(), "unmatched number of braces (depth 1 at end of input)");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_bad_quoting_fixture() {
    let err = load_tree(&fixture("bad_quoting.acf"), &Config::default()).unwrap_err();
    match err {
        KvError::Parse { source, .. } => {
            assert_eq!(source.kind(), ParseErrorKind::MalformedLine);
            assert_eq!(source.line(), Some(4));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_table_and_json_agree_on_structure() {
    let source = std::fs::read_to_string(fixture("libraryfolders.vdf")).unwrap();
    let tree = parse_str(&source).unwrap();

    let table = kvtree::tree::render_table(&tree, &TableOptions::default());
    let blocks = table
        .lines()
        .filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .count();
    assert_eq!(blocks, tree.len());

    let json: serde_json::Value =
        serde_json::from_str(&kvtree::tree::render_json(&tree).unwrap()).unwrap();
    assert_eq!(json["children"].as_array().unwrap().len(), 2);
}
