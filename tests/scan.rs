//! End-to-end tests of the library API: matcher and directory scanner.

use cgrep::index::{IndexSetError, IndexedSet};
use cgrep::query::{find_matches, scan_directory, DirectoryScanner, ScanError, ScanOptions};
use cgrep::utils::{bigrams_of, Bigram, CanonicalText, BIGRAM_DOMAIN};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_match_examples() {
    assert_eq!(
        find_matches("quick brown fox", "the quick brown fox jumps", 0.99).unwrap(),
        vec!["quick brown fox"]
    );
    assert!(find_matches("xyz123", "abc def ghi", 0.95).unwrap().is_empty());
}

#[test]
fn test_short_strings_have_no_bigrams() {
    assert!(bigrams_of(&CanonicalText::new("")).unwrap().is_empty());
    assert!(bigrams_of(&CanonicalText::new("a")).unwrap().is_empty());
}

#[test]
fn test_undersized_set_reports_domain_violation() {
    // A set too small for the bigram domain rejects high bigrams instead of panicking
    let mut set: IndexedSet<Bigram> = IndexedSet::new(64).unwrap();
    let zz = Bigram::from_symbols('z', 'z').unwrap();

    assert_eq!(
        set.insert(&zz).unwrap_err(),
        IndexSetError::IndexOutOfRange {
            index: BIGRAM_DOMAIN - 1,
            capacity: 64
        }
    );
}

#[test]
fn test_scan_corpus() {
    let corpus = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/corpus");
    let results = scan_directory("quick brown fox", &corpus, 0.99).unwrap();

    // Both top-level files are read; the nested directory is not entered
    let mut paths: Vec<_> = results.keys().cloned().collect();
    paths.sort();
    assert_eq!(paths, vec![corpus.join("notes.md"), corpus.join("pangrams.txt")]);
    assert!(results.values().all(|m| m == &vec!["quick brown fox".to_string()]));
}

#[cfg(unix)]
#[test]
fn test_scan_tolerates_unreadable_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("readable.txt"), "we saw a quick brown fox today").unwrap();
    std::os::unix::fs::symlink(dir.path().join("deleted.txt"), dir.path().join("dangling.txt")).unwrap();

    let results = scan_directory("quick brown fox", dir.path(), 0.99).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(
        results[&dir.path().join("readable.txt")],
        vec!["quick brown fox"]
    );
}

#[cfg(unix)]
#[test]
fn test_scan_tolerates_file_without_read_permission() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let locked = dir.path().join("locked.txt");
    fs::write(dir.path().join("open.txt"), "we saw a quick brown fox today").unwrap();
    fs::write(&locked, "the quick brown fox again").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let results = scan_directory("quick brown fox", dir.path(), 0.99).unwrap();

    assert_eq!(results[&dir.path().join("open.txt")], vec!["quick brown fox"]);
    if fs::read(&locked).is_err() {
        assert_eq!(results.len(), 1);
        assert!(!results.contains_key(&locked));
    } else {
        // Privileged users read the file regardless of its mode
        assert_eq!(results[&locked], vec!["quick brown fox"]);
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[test]
fn test_scan_empty_directory() {
    let dir = TempDir::new().unwrap();
    let results = scan_directory("anything", dir.path(), 0.5).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_scan_structural_errors() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "text").unwrap();

    assert!(matches!(
        scan_directory("text", &file, 0.5),
        Err(ScanError::NotADirectory(_))
    ));
    assert!(matches!(
        scan_directory("text", &dir.path().join("absent"), 0.5),
        Err(ScanError::Io { .. })
    ));
}

#[test]
fn test_raising_threshold_never_adds_matches() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("animals.txt"),
        "quick brown fox, quick brown fax, quack brown fix, slow red hen",
    )
    .unwrap();

    let mut previous = usize::MAX;
    for step in 0..=10 {
        let threshold = step as f32 / 10.0;
        let scanner = DirectoryScanner::new(ScanOptions::new(threshold));
        let count: usize = scanner
            .scan("quick brown fox", dir.path())
            .unwrap()
            .values()
            .map(Vec::len)
            .sum();
        assert!(count <= previous, "threshold {} added matches", threshold);
        previous = count;
    }
}
