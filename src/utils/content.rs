//! Reading file content for matching.

use std::fs;
use std::io;
use std::path::Path;

/// Read a whole file as text, newlines preserved.
///
/// Invalid UTF-8 is replaced rather than rejected; the replacement
/// character canonicalizes to a word separator like any other symbol.
pub fn read_text_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Check if content is likely binary
pub fn is_binary(content: &[u8]) -> bool {
    let sample_size = content.len().min(8192);
    let sample = &content[..sample_size];

    // Check for null bytes
    let null_count = sample.iter().filter(|&&b| b == 0).count();
    if null_count > sample_size / 10 {
        return true;
    }

    // Check for high proportion of non-text bytes
    let non_text_count = sample
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\n' && b != b'\r' && b != b'\t')
        .count();

    non_text_count > sample_size / 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_binary() {
        assert!(!is_binary(b"hello world\n"));
        assert!(!is_binary(b""));
        assert!(is_binary(b"\x00\x00\x00\x00\x00\x00\x00\x00"));
        assert!(is_binary(b"\x01\x02\x03\x04 text"));
    }

    #[test]
    fn test_read_text_preserves_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "line one\nline two\n").unwrap();

        assert_eq!(read_text_lossy(&path).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_read_text_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9 noir").unwrap();

        assert_eq!(read_text_lossy(&path).unwrap(), "caf\u{FFFD} noir");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_text_lossy(&dir.path().join("missing.txt")).is_err());
    }
}
