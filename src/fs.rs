//! Thin filesystem adapter.
//! Every failure is reported as [`Error::FilesystemError`] carrying the path
//! involved, so callers never have to attach it themselves.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Lists the direct children of `path`, sorted by file name.
///
/// Directory iteration order differs across platforms; sorting keeps every
/// caller reproducible.
pub fn list_dir<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let mut entries = fs::read_dir(path)
        .map_err(Error::fs(path))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(Error::fs(path))?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(Error::fs(path))
}

/// Writes `content` to `path`, creating missing parent directories first.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    fs::write(path, content).map_err(Error::fs(path))
}

/// Copies `source` to `dest` byte-for-byte, creating missing parent directories first.
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> Result<()> {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    if let Some(parent) = dest.parent() {
        create_dir_all(parent)?;
    }
    fs::copy(source, dest).map(|_| ()).map_err(Error::fs(dest))
}

pub fn create_dir_all<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(Error::fs(path))
}

pub fn remove_dir_all<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::remove_dir_all(path).map_err(Error::fs(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_dir_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.txt", "c.txt", "a.txt"] {
            write_file(temp_dir.path().join(name), "").unwrap();
        }

        let names: Vec<_> = list_dir(temp_dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested/dir/file.txt");

        write_file(&target, "content").unwrap();
        assert_eq!(read_file(&target).unwrap(), "content");
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        match read_file(&missing) {
            Err(Error::FilesystemError { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected FilesystemError, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_dir_all() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("dir/file.txt");
        write_file(&file, "x").unwrap();
        assert!(is_file(&file));

        remove_dir_all(temp_dir.path().join("dir")).unwrap();
        assert!(!exists(&file));
        assert!(!is_dir(temp_dir.path().join("dir")));
    }
}
