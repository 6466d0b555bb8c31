//! Reading and rewriting version strings in tracked files

use crate::error::{Result, VersionBumpError};
use std::fs;
use std::path::Path;

/// Count non-overlapping occurrences of `needle` in the file at `path`
pub fn count_in_file(path: &Path, needle: &str) -> Result<usize> {
    if needle.is_empty() {
        return Err(VersionBumpError::file("search string must not be empty"));
    }
    let contents = read(path)?;
    Ok(contents.matches(needle).count())
}

/// Replace every occurrence of `find` with `replace` in the file at `path`
///
/// The file is rewritten only when it actually changes.
///
/// # Returns
/// * `Ok(usize)` - Number of replaced occurrences
/// * `Err` - If the file cannot be read or written
pub fn replace_in_file(path: &Path, find: &str, replace: &str) -> Result<usize> {
    if find.is_empty() {
        return Err(VersionBumpError::file("search string must not be empty"));
    }
    let contents = read(path)?;
    let count = contents.matches(find).count();
    if count > 0 {
        fs::write(path, contents.replace(find, replace)).map_err(|e| {
            VersionBumpError::file(format!("failed to write {}: {}", path.display(), e))
        })?;
    }
    Ok(count)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| VersionBumpError::file(format!("failed to read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_count_in_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "README.md", "v1.0.0\ninstall v1.0.0\nnot 1.0.1\n");
        assert_eq!(count_in_file(&path, "v1.0.0").unwrap(), 2);
        assert_eq!(count_in_file(&path, "v2.0.0").unwrap(), 0);
    }

    #[test]
    fn test_count_in_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = count_in_file(&dir.path().join("missing.txt"), "1.0.0").unwrap_err();
        assert!(err.to_string().starts_with("File error"));
    }

    #[test]
    fn test_replace_in_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "version.txt", "version = \"1.0.0\"\nother = \"1.0.0\"\n");
        let replaced = replace_in_file(&path, "version = \"1.0.0\"", "version = \"1.1.0\"").unwrap();
        assert_eq!(replaced, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "version = \"1.1.0\"\nother = \"1.0.0\"\n"
        );
    }

    #[test]
    fn test_replace_preserves_missing_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "VERSION", "1.0.0");
        replace_in_file(&path, "1.0.0", "2.0.0").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2.0.0");
    }

    #[test]
    fn test_empty_search_string_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "VERSION", "1.0.0");
        assert!(count_in_file(&path, "").is_err());
        assert!(replace_in_file(&path, "", "x").is_err());
    }
}
