use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Reads the key list: one key per line, line endings stripped, blank lines skipped.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_keys<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::KeySource {
        path: path.to_path_buf(),
        source,
    })?;
    let keys = parse_keys(&String::from_utf8_lossy(&bytes));
    tracing::info!("Loaded {} keys from {}", keys.len(), path.display());
    Ok(keys)
}

pub fn parse_keys(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_matches(|c| c == '\r' || c == '\n'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        let keys = parse_keys("hongxiu.com\r\n69shu.com\n\n  \nqidian.com");
        assert_eq!(keys, vec!["hongxiu.com", "69shu.com", "qidian.com"]);
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        assert_eq!(parse_keys(" a.com \n"), vec![" a.com "]);
    }

    #[test]
    fn test_missing_file_is_key_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_keys(dir.path().join("nope.conf")).unwrap_err();
        assert!(matches!(err, Error::KeySource { .. }));
    }

    #[test]
    fn test_empty_file_gives_no_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.conf");
        fs::write(&path, "").unwrap();
        assert!(read_keys(&path).unwrap().is_empty());
    }

    #[test]
    fn test_non_utf8_lines_do_not_fail_the_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.conf");
        fs::write(&path, b"a.com\n\xff\xfe.cn\r\nb.com\n").unwrap();

        let keys = read_keys(&path).unwrap();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[0], "a.com");
        assert_eq!(keys[1], "\u{FFFD}\u{FFFD}.cn");
        assert_eq!(keys[2], "b.com");
    }
}
